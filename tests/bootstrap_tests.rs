use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use stylemap::prelude::*;

/// End-to-end bootstrap against the style documents shipped as test fixtures
#[cfg(test)]
mod bootstrap_tests {
    use super::*;

    fn fixture_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/styles")
    }

    fn bootstrapper(engine: Arc<DryRunEngine>) -> StyleBootstrapper {
        StyleBootstrapper::new(engine, Arc::new(DirectoryResources::new(fixture_dir())))
            .with_cache_root(CacheRoot::new(std::env::temp_dir()))
    }

    #[test]
    fn test_env_style_config_launches_fixture_style() {
        let engine = Arc::new(DryRunEngine::new());
        let config = SessionConfig::from_lookup(|key| match key {
            "MAPTILER_TOKEN" => Some("integration-token".to_string()),
            "MAPTILER_STYLE" => Some("0".to_string()),
            _ => None,
        });

        let legend = Arc::new(Mutex::new(Vec::new()));
        let legend_clone = legend.clone();
        let session = MapSession::builder("MapTiler Test Cases", bootstrapper(engine.clone()))
            .on_ready(move |sheet| {
                legend_clone
                    .lock()
                    .unwrap()
                    .extend(sheet.layer_ids().map(str::to_string));
            })
            .launch(&config)
            .unwrap();

        assert_eq!(
            *legend.lock().unwrap(),
            ["background", "water", "road_major", "place_label"]
        );

        let handle = session.handle().unwrap();
        assert_eq!(handle.style().name, "Basic");
        assert!(handle.cache_dir().starts_with(std::env::temp_dir()));

        let request = engine.request(handle.id()).unwrap();
        assert_eq!(request.style.location, Some(fixture_dir().join("maptiler_basic.json")));
        assert!(!request.render_all_polygons);

        let urls = request.resolved_source_urls().unwrap();
        assert_eq!(urls.len(), 3);
        for url in &urls {
            assert!(url.contains("integration-token"), "{} lacks token", url);
            assert!(!url.contains("MapTilerKey"), "{} still has marker", url);
        }
        assert_eq!(urls[0], "https://api.maptiler.com/maps/basic/sprite?key=integration-token");
    }

    #[test]
    fn test_missing_fixture_reports_resource_missing() {
        let engine = Arc::new(DryRunEngine::new());
        // Streets is in the catalog but has no fixture file
        let result = MapSession::builder("streets", bootstrapper(engine.clone()))
            .launch(&SessionConfig::new("t").with_style_index(2));

        match result {
            Err(MapError::Style(StyleError::ResourceMissing { sheet_id })) => {
                assert_eq!(sheet_id, "maptiler_streets")
            }
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("session should not start"),
        }
        assert_eq!(engine.active_sessions(), 0);
    }

    #[test]
    fn test_missing_token_notice() {
        let engine = Arc::new(DryRunEngine::new());
        let config = SessionConfig::from_lookup(|_| None);

        match MapSession::builder("no-token", bootstrapper(engine.clone())).launch(&config) {
            Err(MapError::Token(e)) => assert_eq!(e.notice().title, "Missing Token"),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_) => panic!("session should not start"),
        }
        assert_eq!(engine.active_sessions(), 0);
    }

    #[test]
    fn test_sessions_get_distinct_cache_dirs() {
        let engine = Arc::new(DryRunEngine::new());
        let config = SessionConfig::new("t");

        let a = MapSession::builder("Map Test", bootstrapper(engine.clone()))
            .launch(&config)
            .unwrap();
        let b = MapSession::builder("Globe Test", bootstrapper(engine.clone()))
            .kind(MapKind::Globe)
            .launch(&config)
            .unwrap();

        assert_ne!(a.cache_dir(), b.cache_dir());
        assert_eq!(engine.active_sessions(), 2);

        drop(a);
        drop(b);
        assert_eq!(engine.active_sessions(), 0);
    }

    #[test]
    fn test_rewrite_rule_properties() {
        let token = validate_token("abc").unwrap();
        let rule = build_rewrite_rule(&token);

        let local = reqwest::Url::parse("file:///bundle/maptiler_basic.json").unwrap();
        assert_eq!(rule.rewrite(&rule.rewrite(&local)), local);

        let marked = reqwest::Url::parse("https://api.maptiler.com/tiles/v3/tiles.json?key=MapTilerKey").unwrap();
        let rewritten = rule.rewrite(&marked);
        assert!(rewritten.as_str().contains("abc"));
        assert!(!rewritten.as_str().contains(TOKEN_MARKER));

        let plain = reqwest::Url::parse("https://api.maptiler.com/maps/streets/style.json").unwrap();
        let rewritten = rule.rewrite(&plain);
        let keys: Vec<_> = rewritten
            .query_pairs()
            .filter(|(k, _)| k == "key")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, ["abc"]);
    }
}
