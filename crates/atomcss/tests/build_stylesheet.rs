//! Integration tests for building stylesheets from complete configurations.

use std::path::PathBuf;

use atomcss::prelude::*;
use atomcss::ParseErrorKind;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn site() -> Compiler {
    setup();
    Compiler::load(fixture("stylify.json")).unwrap()
}

fn compiler(json: &str) -> Compiler {
    setup();
    Compiler::from_config(Config::from_json_str(json).unwrap()).unwrap()
}

fn decl(property: &str, value: &str) -> Declaration {
    Declaration::new(property, value)
}

#[test]
fn exact_output_for_a_small_config() {
    let compiler = compiler(
        r#"{
            "variables": {},
            "plainSelectors": { "hr": "border:0" },
            "components": { "title": "font-size:32px md:font-size:60px lg:font-size:72px" }
        }"#,
    );

    let build = compiler.build(&["title"]);
    assert!(build.is_clean());
    assert_eq!(
        build.css,
        "\
hr {
    border: 0;
}

.title {
    font-size: 32px;
}

@media (min-width: 768px) {
    .title {
        font-size: 60px;
    }
}

@media (min-width: 1024px) {
    .title {
        font-size: 72px;
    }
}
"
    );
}

#[test]
fn builds_are_deterministic() {
    let requested = ["integration-block", "btn--transparent", "container", "hp__section-title"];
    let first = site().build(&requested);
    let second = site().build(&requested);
    assert!(first.is_clean(), "{:?}", first.diagnostics);
    assert_eq!(first.css, second.css);
}

#[test]
fn breakpoints_are_emitted_narrowest_first() {
    let build = site().build(&["integration-block"]);
    let sm = build.css.find("@media (min-width: 640px)").unwrap();
    let md = build.css.find("@media (min-width: 768px)").unwrap();
    let lg = build.css.find("@media (min-width: 1024px)").unwrap();
    let base = build.css.find(".integration-block {").unwrap();
    assert!(base < sm && sm < md && md < lg);
}

#[test]
fn repeated_property_in_a_layer_keeps_last_value() {
    let build = site().build(&["container"]);
    let rule = build.rule("container").unwrap();

    assert_eq!(rule.layers[1].variant, Variant::at("md"));
    assert_eq!(
        rule.layers[1].declarations,
        [decl("padding-left", "12px"), decl("padding-right", "24px")]
    );
    assert_eq!(rule.layers[2].declarations, [decl("padding-left", "24px")]);
}

#[test]
fn chained_component_composes_with_its_chain() {
    let build = site().build(&["btn--transparent"]);
    let rule = build.rule("btn--transparent").unwrap();

    let base = &rule.layers[0].declarations;
    assert_eq!(base.first(), Some(&decl("background-color", "#01befe")));
    assert_eq!(base.last(), Some(&decl("background", "none")));
    assert!(base.contains(&decl("padding", "12px 24px")));

    assert!(build.css.contains(
        ".btn--transparent:hover {\n    background-color: rgba(1, 190, 254, 0.1);\n}"
    ));
    // The chained component is not requested on its own.
    assert!(!build.css.contains(".btn {"));
}

#[test]
fn escapes_become_spaces() {
    let build = site().build(&["btn", "integration-block"]);
    assert!(build.css.contains("border-bottom: 1px solid #e5e7eb;"));
    assert!(build.css.contains("transition: background-color 0.3s, color 0.3s;"));
    assert!(build.css.contains("width: calc(100% * 1/2 - 12px);"));
    assert!(build.css.contains("box-shadow: 0 8px 32px -8px rgb(0, 0, 0, 0.2);"));
}

#[test]
fn plain_selectors_are_always_emitted_verbatim() {
    let build = site().build(&[] as &[&str]);
    assert!(build.css.contains("::selection {\n    color: #fff;\n    background: #01befe;\n}"));
    assert!(build.css.contains(
        "article h2:hover > a[href^=\"#\"][aria-hidden=true], article h3:hover > a[href^=\"#\"][aria-hidden=true]"
    ));
    assert!(!build.css.contains(".btn"));
}

#[test]
fn unrequested_components_are_excluded() {
    let build = site().build(&["btn", "not-a-component"]);
    assert!(build.is_clean());
    assert!(build.css.contains(".btn {"));
    assert!(!build.css.contains(".btn--transparent"));
    assert!(!build.css.contains(".container"));
}

#[test]
fn class_set_from_markup() {
    let mut classes = ClassSet::new();
    classes.extend_from_class_list("hp__section-content btn--transparent");
    classes.extend_from_class_list("btn--transparent hp__section-content");

    let build = site().build(&classes);
    let names: Vec<_> = build
        .rules
        .iter()
        .filter(|rule| rule.origin == RuleOrigin::Component)
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(names, ["hp__section-content", "btn--transparent"]);
}

#[test]
fn chain_cycle_is_reported_and_the_rest_builds() {
    let compiler = compiler(
        r#"{
            "variables": {},
            "plainSelectors": {},
            "components": {
                "x": { "selectors": "color:red", "selectorsChain": "y" },
                "y": { "selectors": "color:blue", "selectorsChain": "x" },
                "ok": "color:green"
            }
        }"#,
    );

    let build = compiler.build(&["x", "ok"]);
    assert_eq!(build.diagnostics.len(), 1);
    let error = &build.diagnostics[0];
    assert_eq!(error.kind(), ErrorKind::MacroCycle);
    let message = error.to_string();
    assert!(message.contains("x -> y -> x"), "{message}");
    assert_eq!(build.css, ".ok {\n    color: green;\n}\n");
}

#[test]
fn every_problem_in_a_build_is_reported() {
    let compiler = compiler(
        r#"{
            "variables": { "loop": "$loop" },
            "plainSelectors": { "a": "xl:color:red" },
            "components": {
                "missing-chain": { "selectors": "color:red", "selectorsChain": "nope" },
                "no-colon": "color:red nocolon",
                "cyclic-var": "color:$loop",
                "fine": "color:blue"
            }
        }"#,
    );

    let build = compiler.build(&["missing-chain", "no-colon", "cyclic-var", "fine"]);
    let kinds: Vec<_> = build.diagnostics.iter().map(Error::kind).collect();
    assert_eq!(
        kinds,
        [
            ErrorKind::Parse,
            ErrorKind::UnknownMacroReference,
            ErrorKind::Parse,
            ErrorKind::VariableCycle,
        ]
    );

    assert!(matches!(
        &build.diagnostics[0],
        Error::Parse { kind: ParseErrorKind::UnknownPrefix, .. }
    ));
    let no_colon = build.diagnostics[2].location().unwrap();
    assert_eq!(no_colon.key, "no-colon");
    assert_eq!(no_colon.offset, Some(10));

    assert_eq!(build.css, ".fine {\n    color: blue;\n}\n");
}

#[test]
fn validate_finds_problems_in_unrequested_components() {
    let compiler = compiler(
        r#"{
            "variables": {},
            "plainSelectors": {},
            "components": {
                "used": "color:red",
                "unused": "color:$undefined"
            }
        }"#,
    );

    assert!(compiler.build(&["used"]).is_clean());
    let diagnostics = compiler.validate();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), ErrorKind::UnresolvedVariable);
}

#[test]
fn identical_adjacent_rules_are_grouped() {
    let json = r#"{
        "variables": {},
        "plainSelectors": {},
        "components": { "a": "margin:0 md:padding:4px", "b": "margin:0 md:padding:4px" }
    }"#;

    let build = compiler(json).build(&["a", "b"]);
    assert!(build.css.starts_with(".a, .b {\n    margin: 0;\n}\n"));
    assert!(build.css.contains("    .a, .b {\n        padding: 4px;\n    }\n"));

    let ungrouped = compiler(json)
        .with_options(BuildOptions {
            group_selectors: false,
            ..BuildOptions::default()
        })
        .build(&["a", "b"]);
    assert!(ungrouped.css.starts_with(".a {\n    margin: 0;\n}\n\n.b {"));
}

#[test]
fn minified_build() {
    let compiler = site().with_options(BuildOptions {
        minify: true,
        ..BuildOptions::default()
    });
    let build = compiler.build(&["hp__section-content"]);
    assert!(!build.css.contains('\n'));
    assert!(build.css.contains(".hp__section-content{margin-top:40px}"));
    assert!(build.css.ends_with("@media (min-width:768px){.hp__section-content{margin-top:80px}}"));
}

#[test]
fn pseudo_variants_on_selector_lists() {
    let build = compiler(
        r#"{
            "variables": {},
            "plainSelectors": { "article .note, article .note *": "color:black hover:color:red" },
            "components": {}
        }"#,
    )
    .build(&[] as &[&str]);

    assert!(build.css.contains("article .note:hover, article .note *:hover {\n    color: red;\n}"));
}

#[test]
fn custom_properties_and_overrides() {
    let mut overrides = VariableTable::new();
    overrides.insert("blue1", "navy");

    let compiler = site().with_options(BuildOptions {
        emit_custom_properties: true,
        variable_overrides: overrides,
        ..BuildOptions::default()
    });
    let build = compiler.build(&["hp__section-more-info-link"]);

    assert!(build.css.starts_with(":root {\n    --blue1: navy;\n    --blue2: #f2fcff;"));
    assert!(build.css.contains("::selection {\n    color: #fff;\n    background: navy;\n}"));
    assert!(build.css.contains(".hp__section-more-info-link {\n    text-decoration: none;\n    color: navy;"));
}

#[test]
fn variables_export_as_scss() {
    let compiler = site();
    let scss = compiler.context().variables().to_scss();
    assert!(scss.starts_with("$blue1: #01befe;\n$blue2: #f2fcff;\n"));
    assert!(scss.ends_with("$radius2: 8px;\n"));
    assert_eq!(compiler.context().ignored_elements(), ["code-editor"]);
}

#[test]
fn loads_toml_from_disk() {
    setup();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::io::Write::write_all(
        &mut file,
        br#"
[variables]
gap = "12px"

[breakpoints]
tablet = "600px"
desktop = 1200

[plainSelectors]

[components]
stack = "display:flex gap:$gap desktop:gap:24px tablet:gap:18px"
"#,
    )
    .unwrap();

    let compiler = Compiler::load(file.path()).unwrap();
    let build = compiler.build(&["stack"]);
    assert!(build.is_clean(), "{:?}", build.diagnostics);
    let tablet = build.css.find("@media (min-width: 600px)").unwrap();
    let desktop = build.css.find("@media (min-width: 1200px)").unwrap();
    assert!(tablet < desktop);
    assert!(!build.css.contains("768px"));
}
