// End-to-end tests: registry JSON in, rewritten HTML out.

use chunkref_common::{ChunkRegistry, Config, Passes};
use chunkref_renderer::{
    ReferenceRenderer, resolve_explicit_markers, resolve_implicit_references,
    retain_known_markers,
};

fn registry() -> ChunkRegistry {
    let json = serde_json::json!([
        {"id": "c1", "chunk_type": "Lemma", "number": "1", "summary": "bounded"},
        {"id": "c9", "chunk_type": "theorem", "number": "3.2", "summary": "main result"},
        {"id": "d1", "chunk_type": "definition", "number": 2},
        {"chunk_type": "remark", "number": "5"},
        {"id": "loose", "summary": "no type"}
    ]);
    ChunkRegistry::from_json(&json.to_string()).unwrap()
}

fn config() -> Config {
    Config {
        current_id: Some("c1".into()),
        ..Config::default()
    }
}

#[test]
fn full_pipeline() {
    let registry = registry();
    let config = config();
    let out = ReferenceRenderer::new(&registry, &config)
        .render("<p>By [REF:c9], Lemma 1 holds; see [[thm 3.2]].</p>");
    insta::assert_snapshot!(out, @r##"<p>By <span class="chunk-ref" data-type="theorem" data-num="3.2" data-id="c9">定理 3.2</span>, <span class="chunk-ref chunk-ref-self" data-type="lemma" data-num="1">Lemma 1</span> holds; see <a href="#/chunks?ref=thm%203.2"><span class="chunk-ref" data-type="theorem" data-num="3.2" data-id="c9">thm 3.2</span></a>.</p>"##);
}

#[test]
fn pipeline_is_idempotent() {
    let registry = registry();
    let config = config();
    let renderer = ReferenceRenderer::new(&registry, &config);
    let once = renderer.render("定理 3.2 与 [REF:definition/2/] 及 Definition 2 [REF:missing]");
    assert_eq!(renderer.render(&once), once);
}

#[test]
fn disabled_passes_are_skipped() {
    let registry = registry();
    let config = Config {
        passes: Passes {
            explicit: true,
            wikilinks: false,
            implicit: false,
        },
        ..config()
    };
    let out = ReferenceRenderer::new(&registry, &config).render("Lemma 1 [[x]] [REF:c9]");
    assert!(out.starts_with("Lemma 1 [[x]] <span"));
}

#[test]
fn records_without_id_or_type_are_not_linked() {
    let registry = registry();
    assert_eq!(registry.len(), 4);
    let out = resolve_implicit_references("Remark 5", registry.by_type_and_number(), None);
    assert_eq!(out, "Remark 5");
    let out = resolve_explicit_markers(
        "[REF:loose]",
        registry.by_type_and_number(),
        Some(registry.by_id()),
    );
    assert_eq!(out, r#"<span class="chunk-ref" data-id="loose">REF</span>"#);
}

#[test]
fn numeric_numbers_resolve() {
    let registry = registry();
    let out = resolve_implicit_references("定义 2", registry.by_type_and_number(), None);
    assert!(out.contains(r#"data-id="d1""#));
}

#[test]
fn plain_html_passes_through() {
    let registry = registry();
    let config = config();
    let input = "<h2>Section 3</h2>\n<p>Let <i>f</i> be continuous on [0, 1].</p>";
    assert_eq!(ReferenceRenderer::new(&registry, &config).render(input), input);
}

#[test]
fn solver_answers_are_validated_then_rendered() {
    let registry = registry();
    let answer = "由 [REF:c9] 及 [REF:hallucinated] 可得结论。";
    let validated = retain_known_markers(answer, registry.by_id());
    assert_eq!(validated, "由 [REF:c9] 及  可得结论。");
    let out = resolve_explicit_markers(
        &validated,
        registry.by_type_and_number(),
        Some(registry.by_id()),
    );
    assert!(out.contains(">定理 3.2</span>"));
    assert!(!out.contains("[REF:"));
}

#[test]
fn summary_markup_cannot_close_the_annotation() {
    let registry = registry();
    let config = config();
    let out = ReferenceRenderer::new(&registry, &config)
        .render("<p>[REF:theorem/3.2/a</span> thm 3.2]</p>");
    assert_eq!(out.matches("<span").count(), 1);
    assert_eq!(out.matches("</span>").count(), 1);
    assert!(out.contains(r#"data-id="c9">定理 3.2: a thm 3.2</span></p>"#));
}
