//! Integration tests for the feature extraction modules
//!
//! Checks that the extractors cover the full schema when combined.

#[cfg(test)]
mod integration_tests {
    use crate::features::{
        lexical::LexicalFeatures,
        network::NetworkFeatures,
        vector::{FeatureExtractor, FeatureVector},
        FEATURE_COUNT, FEATURE_LAYOUT,
    };
    use crate::probes::ProbeOutcome;
    use crate::url::ParsedUrl;

    #[test]
    fn test_extractors_cover_every_slot() {
        let url = ParsedUrl::from_input("http://a.b.secure-login.co.uk:8080//redirect@x");
        let lexical = LexicalFeatures::from_url(&url);
        let network = NetworkFeatures {
            dns: ProbeOutcome::Failed,
            cert: ProbeOutcome::Failed,
        };

        // Poison every slot, then extract; every feature must be rewritten.
        let mut vector = FeatureVector::from_values([-1.0; FEATURE_COUNT]);
        lexical.extract(&mut vector);
        network.extract(&mut vector);

        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_ne!(
                vector.values[i], -1.0,
                "feature {} was never written",
                name
            );
        }
    }

    #[test]
    fn test_shortener_scenario() {
        // "bit.ly/xyz" with deterministically unreachable probes
        let url = ParsedUrl::from_input("bit.ly/xyz");
        let lexical = LexicalFeatures::from_url(&url);
        let network = NetworkFeatures::unreachable();

        let mut vector = FeatureVector::new();
        lexical.extract(&mut vector);
        network.extract(&mut vector);

        assert_eq!(vector.get_by_name("shortening_service"), Some(1.0));
        assert_eq!(vector.get_by_name("https_token"), Some(0.0));
        assert_eq!(vector.get_by_name("url_length"), Some(17.0));
        assert_eq!(vector.get_by_name("dns_record"), Some(1.0));
        assert_eq!(vector.get_by_name("ssl_certificate"), Some(1.0));
    }

    #[test]
    fn test_lexical_is_deterministic() {
        let url = ParsedUrl::from_input("https://a.example.com/login?next=//evil");
        assert_eq!(
            LexicalFeatures::from_url(&url),
            LexicalFeatures::from_url(&url)
        );
    }
}
