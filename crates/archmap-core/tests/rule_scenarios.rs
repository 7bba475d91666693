//! Integration test: rule text → judge → classification end-to-end.

use archmap_core::{
    rules, Classification, CodeElement, CodeExplorerConfiguration, DependencyEdge, DerivedCache,
};

fn edge(origin: &str, target: &str) -> DependencyEdge {
    DependencyEdge::new(CodeElement::class(origin), CodeElement::class(target))
}

// ── Sample rules from the configuration file ──

#[test]
fn up_rule_between_top_level_segments() {
    let judge = rules::compile("a ->^ b").judge;
    assert_eq!(judge.classify(&edge("a.X", "b.Y")), Classification::Allowed);
    assert_eq!(judge.classify(&edge("b.Y", "a.X")), Classification::Violating);
    assert_eq!(judge.classify(&edge("c.Z", "a.X")), Classification::Unspecified);
}

#[test]
fn same_result_with_explicit_prefix_patterns() {
    let judge = rules::compile("a.* ->^ b.*").judge;
    assert_eq!(judge.classify(&edge("a.X", "b.Y")), Classification::Allowed);
    assert_eq!(judge.classify(&edge("b.Y", "a.X")), Classification::Violating);
}

#[test]
fn chained_up_and_down_rules() {
    let judge = rules::compile(" a ->^ b\n b ->v c").judge;
    let cases = [
        (("a.X", "b.Y"), Classification::Allowed),
        (("b.Y", "a.X"), Classification::Violating),
        (("c.Z", "b.Y"), Classification::Allowed),
        (("b.Y", "c.Z"), Classification::Violating),
        (("a.X", "c.Z"), Classification::Unspecified),
        (("c.Z", "a.X"), Classification::Unspecified),
    ];
    for ((origin, target), expected) in cases {
        assert_eq!(
            judge.classify(&edge(origin, target)),
            expected,
            "{origin} -> {target}"
        );
    }
}

#[test]
fn layered_architecture() {
    let text = "\
# presentation on top, domain at the bottom
com.shop.web ->^ com.shop.app
com.shop.app ->^ com.shop.domain
com.shop.infra ->^ com.shop.domain
";
    let compiled = rules::compile(text);
    assert!(compiled.errors.is_empty());
    let judge = compiled.judge;

    assert_eq!(
        judge.classify(&edge("com.shop.web.CartController", "com.shop.app.CartService")),
        Classification::Allowed
    );
    assert_eq!(
        judge.classify(&edge("com.shop.domain.Cart", "com.shop.infra.CartRepository")),
        Classification::Violating
    );
    // web -> domain is neither permitted nor forbidden
    assert_eq!(
        judge.classify(&edge("com.shop.web.CartController", "com.shop.domain.Cart")),
        Classification::Unspecified
    );
    assert_eq!(
        judge.classify(&edge("com.shopping.X", "com.shop.app.Y")),
        Classification::Unspecified
    );
}

#[test]
fn malformed_lines_do_not_disable_valid_rules() {
    let compiled = rules::compile("a ->^ b\nthis is wrong\nb ->x c\nb ->v c");
    assert_eq!(compiled.errors.len(), 2);
    assert_eq!(compiled.errors[0].line, 2);
    assert_eq!(compiled.errors[1].line, 3);
    assert_eq!(compiled.judge.rules().len(), 2);
    assert_eq!(
        compiled.judge.classify(&edge("c.Z", "b.Y")),
        Classification::Allowed
    );
}

#[test]
fn cached_judge_matches_fresh_compile() {
    let config = CodeExplorerConfiguration::new("shop", vec![], " a ->^ b\n b ->v c");
    let mut cache = DerivedCache::new();
    let first = cache.initialize(&config);
    let second = cache.initialize(&config);
    let fresh = config.compile();

    for e in [edge("a.X", "b.Y"), edge("b.Y", "c.Z"), edge("q.Q", "a.X")] {
        assert_eq!(first.judge.classify(&e), fresh.judge.classify(&e));
        assert_eq!(second.judge.classify(&e), fresh.judge.classify(&e));
    }
}

#[test]
fn annotation_directives_reach_matcher() {
    let compiled = rules::compile("annotation org.springframework.stereotype.*\na ->^ b");
    assert!(compiled
        .annotation_matcher
        .matches("org.springframework.stereotype.Service"));
    assert!(!compiled.annotation_matcher.matches("javax.inject.Inject"));
    assert_eq!(compiled.judge.rules().len(), 1);
}
