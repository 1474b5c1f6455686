//! CSS serialization.

use std::borrow::Borrow;

use atomcss_core::context::{Breakpoint, BreakpointTable};
use atomcss_core::logging::targets;

use super::rule::ResolvedRule;
use crate::parser::Declaration;

/// Output formatting switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Drop all insignificant whitespace.
    pub minify: bool,
    /// Merge adjacent rules of one layer whose bodies are byte-identical.
    pub group_selectors: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            minify: false,
            group_selectors: true,
        }
    }
}

/// One selector list with its declaration block.
#[derive(Debug)]
struct Block<'r> {
    selectors: Vec<String>,
    declarations: &'r [Declaration],
}

/// Serializes resolved rules into a stylesheet.
///
/// Output order is fixed by the input alone: base-layer rules first, in the
/// order given, then one `@media (min-width)` block per breakpoint from
/// narrowest to widest, each holding that breakpoint's rules in the order
/// given. Breakpoints without rules produce no block.
#[derive(Debug, Clone)]
pub struct Emitter<'a> {
    breakpoints: &'a BreakpointTable,
    options: EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(breakpoints: &'a BreakpointTable, options: EmitOptions) -> Self {
        Self {
            breakpoints,
            options,
        }
    }

    /// Serialize `rules`, preceded by a `:root` block for `custom_properties`
    /// when it is non-empty.
    pub fn emit<R>(&self, rules: &[R], custom_properties: &[(String, String)]) -> String
    where
        R: Borrow<ResolvedRule>,
    {
        let mut writer = CssWriter::new(self.options.minify);

        if !custom_properties.is_empty() {
            let declarations: Vec<Declaration> = custom_properties
                .iter()
                .map(|(name, value)| Declaration::new(format!("--{name}"), value.as_str()))
                .collect();
            writer.rule(&[":root".to_owned()], &declarations, 0);
        }

        for block in self.blocks(rules, None) {
            writer.rule(&block.selectors, block.declarations, 0);
        }

        let mut media_blocks = 0usize;
        for breakpoint in self.breakpoints.iter() {
            let blocks = self.blocks(rules, Some(breakpoint));
            if blocks.is_empty() {
                continue;
            }
            media_blocks += 1;
            writer.open_media(breakpoint);
            for block in blocks {
                writer.rule(&block.selectors, block.declarations, 1);
            }
            writer.close_media();
        }

        tracing::debug!(
            target: targets::EMIT,
            rules = rules.len(),
            media_blocks,
            minify = self.options.minify,
            "emitted stylesheet"
        );

        writer.finish()
    }

    /// Blocks of one breakpoint layer, in rule order.
    fn blocks<'r, R>(&self, rules: &'r [R], breakpoint: Option<&Breakpoint>) -> Vec<Block<'r>>
    where
        R: Borrow<ResolvedRule>,
    {
        let name = breakpoint.map(|bp| bp.name.as_str());
        let mut blocks: Vec<Block<'r>> = Vec::new();

        for rule in rules {
            let rule: &'r ResolvedRule = rule.borrow();
            for layer in &rule.layers {
                if layer.variant.breakpoint.as_deref() != name || layer.declarations.is_empty() {
                    continue;
                }
                let selector = rule.selector_for(&layer.variant);

                if self.options.group_selectors
                    && let Some(previous) = blocks.last_mut()
                    && previous.declarations == layer.declarations.as_slice()
                {
                    if !previous.selectors.contains(&selector) {
                        previous.selectors.push(selector);
                    }
                    continue;
                }

                blocks.push(Block {
                    selectors: vec![selector],
                    declarations: &layer.declarations,
                });
            }
        }

        blocks
    }
}

/// Accumulates CSS text in pretty or minified form.
struct CssWriter {
    out: String,
    minify: bool,
}

impl CssWriter {
    fn new(minify: bool) -> Self {
        Self {
            out: String::new(),
            minify,
        }
    }

    fn indent(&mut self, depth: usize) {
        if !self.minify {
            for _ in 0..depth {
                self.out.push_str("    ");
            }
        }
    }

    /// Separate top-level statements with a blank line.
    fn separate(&mut self, depth: usize) {
        if !self.minify && !self.out.is_empty() && !self.out.ends_with("{\n") {
            self.out.push('\n');
        }
        self.indent(depth);
    }

    fn rule(&mut self, selectors: &[String], declarations: &[Declaration], depth: usize) {
        self.separate(depth);
        self.out
            .push_str(&selectors.join(if self.minify { "," } else { ", " }));

        if self.minify {
            self.out.push('{');
            for (i, declaration) in declarations.iter().enumerate() {
                if i > 0 {
                    self.out.push(';');
                }
                self.out.push_str(&declaration.property);
                self.out.push(':');
                self.out.push_str(&declaration.value);
            }
            self.out.push('}');
            return;
        }

        self.out.push_str(" {\n");
        for declaration in declarations {
            self.indent(depth + 1);
            self.out.push_str(&declaration.property);
            self.out.push_str(": ");
            self.out.push_str(&declaration.value);
            self.out.push_str(";\n");
        }
        self.indent(depth);
        self.out.push_str("}\n");
    }

    fn open_media(&mut self, breakpoint: &Breakpoint) {
        self.separate(0);
        if self.minify {
            self.out
                .push_str(&format!("@media (min-width:{}px){{", breakpoint.min_width));
        } else {
            self.out.push_str("@media ");
            self.out.push_str(&breakpoint.media_query());
            self.out.push_str(" {\n");
        }
    }

    fn close_media(&mut self) {
        self.out.push_str(if self.minify { "}" } else { "}\n" });
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::RuleOrigin;
    use crate::parser::{PseudoClass, Variant};
    use crate::resolve::CascadeLayer;

    fn layer(variant: Variant, declarations: &[(&str, &str)]) -> CascadeLayer {
        CascadeLayer {
            variant,
            declarations: declarations
                .iter()
                .map(|(p, v)| Declaration::new(*p, *v))
                .collect(),
        }
    }

    fn component(name: &str, layers: Vec<CascadeLayer>) -> ResolvedRule {
        ResolvedRule {
            name: name.into(),
            selector: format!(".{name}"),
            origin: RuleOrigin::Component,
            layers,
        }
    }

    #[test]
    fn base_rules_then_media_blocks() {
        let table = BreakpointTable::default();
        let rules = vec![component(
            "title",
            vec![
                layer(Variant::base(), &[("font-size", "32px")]),
                layer(Variant::at("md"), &[("font-size", "60px")]),
                layer(Variant::at("lg"), &[("font-size", "72px")]),
            ],
        )];

        let css = Emitter::new(&table, EmitOptions::default()).emit(&rules, &[]);
        assert_eq!(
            css,
            "\
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
    fn minified_output() {
        let table = BreakpointTable::default();
        let rules = vec![component(
            "btn",
            vec![
                layer(Variant::base(), &[("color", "#fff"), ("padding", "12px 24px")]),
                layer(
                    Variant::base().with_pseudo(PseudoClass::Hover),
                    &[("color", "#000")],
                ),
                layer(Variant::at("sm"), &[("padding", "8px")]),
            ],
        )];

        let options = EmitOptions {
            minify: true,
            ..EmitOptions::default()
        };
        let css = Emitter::new(&table, options).emit(&rules, &[]);
        assert_eq!(
            css,
            ".btn{color:#fff;padding:12px 24px}.btn:hover{color:#000}@media (min-width:640px){.btn{padding:8px}}"
        );
    }

    #[test]
    fn adjacent_identical_bodies_are_grouped() {
        let table = BreakpointTable::default();
        let rules = vec![
            component("a", vec![layer(Variant::base(), &[("margin", "0")])]),
            component("b", vec![layer(Variant::base(), &[("margin", "0")])]),
            component("c", vec![layer(Variant::base(), &[("margin", "1px")])]),
            component("d", vec![layer(Variant::base(), &[("margin", "0")])]),
        ];

        let options = EmitOptions {
            minify: true,
            group_selectors: true,
        };
        let css = Emitter::new(&table, options).emit(&rules, &[]);
        assert_eq!(css, ".a,.b{margin:0}.c{margin:1px}.d{margin:0}");

        let options = EmitOptions {
            minify: true,
            group_selectors: false,
        };
        let css = Emitter::new(&table, options).emit(&rules, &[]);
        assert_eq!(css, ".a{margin:0}.b{margin:0}.c{margin:1px}.d{margin:0}");
    }

    #[test]
    fn custom_properties_come_first() {
        let table = BreakpointTable::default();
        let rules = vec![component("a", vec![layer(Variant::base(), &[("color", "red")])])];
        let props = vec![("blue1".to_owned(), "#01befe".to_owned())];

        let css = Emitter::new(&table, EmitOptions::default()).emit(&rules, &props);
        assert!(css.starts_with(":root {\n    --blue1: #01befe;\n}\n\n.a {"));
    }

    #[test]
    fn empty_input_emits_nothing() {
        let table = BreakpointTable::default();
        assert_eq!(Emitter::new(&table, EmitOptions::default()).emit::<ResolvedRule>(&[], &[]), "");
    }
}
