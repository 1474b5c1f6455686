//! The build driver.
//!
//! A [`Compiler`] owns one [`CompileContext`] and turns a set of requested
//! class names into a stylesheet:
//!
//! ```text
//! requested names ──► dedupe, drop unknown ──┐
//!                                            ▼
//! plain selectors ──────────────► MacroExpander (parallel, cached)
//!                                            │
//!                     ok ◄───────────────────┴──────────────► err
//!                     │                                        │
//!                     ▼                                        ▼
//!                  Emitter ──► Build::css            Build::diagnostics
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use atomcss_core::context::VariableTable;
use atomcss_core::logging::targets;
use atomcss_core::{CompileContext, Config, Error, Location, Result, Section};
use rayon::prelude::*;

use crate::emit::{EmitOptions, Emitter, ResolvedRule, RuleOrigin};
use crate::resolve::{MacroExpander, ResolutionCache, ResolutionCacheKey, VariableResolver};

/// Knobs for one [`Compiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Emit without insignificant whitespace.
    pub minify: bool,
    /// Merge adjacent rules with identical bodies into one selector list.
    pub group_selectors: bool,
    /// Prepend a `:root` block exposing every variable as a custom property.
    pub emit_custom_properties: bool,
    /// Variables that shadow the context's table for this compiler's builds.
    pub variable_overrides: VariableTable,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            minify: false,
            group_selectors: true,
            emit_custom_properties: false,
            variable_overrides: VariableTable::new(),
        }
    }
}

impl BuildOptions {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            minify: self.minify,
            group_selectors: self.group_selectors,
        }
    }
}

/// The result of one build.
#[derive(Debug)]
pub struct Build {
    /// The stylesheet. Rules listed in `diagnostics` are absent from it.
    pub css: String,
    /// Every rule that resolved, plain selectors first, then components in
    /// request order.
    pub rules: Vec<Arc<ResolvedRule>>,
    /// One error per definition that failed to resolve.
    pub diagnostics: Vec<Error>,
}

impl Build {
    /// Whether every requested definition resolved.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Look up a resolved rule by component name or plain selector text.
    pub fn rule(&self, name: &str) -> Option<&ResolvedRule> {
        self.rules
            .iter()
            .map(Arc::as_ref)
            .find(|rule| rule.name == name)
    }
}

/// A supplier of requested class names.
///
/// Names are yielded in first-seen order; repeats are allowed and ignored by
/// the compiler. Markup scanners implement this to feed a build.
pub trait SelectorSource {
    fn class_names(&self) -> impl Iterator<Item = &str>;
}

impl<S: AsRef<str>> SelectorSource for [S] {
    fn class_names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::<str>::as_ref)
    }
}

impl<S: AsRef<str>, const N: usize> SelectorSource for [S; N] {
    fn class_names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::<str>::as_ref)
    }
}

impl<S: AsRef<str>> SelectorSource for Vec<S> {
    fn class_names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(AsRef::<str>::as_ref)
    }
}

/// An insertion-ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.order.push(name);
        true
    }

    /// Add every name of an HTML `class` attribute value.
    pub fn extend_from_class_list(&mut self, class_list: &str) {
        for name in class_list.split_whitespace() {
            self.insert(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for ClassSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ClassSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl SelectorSource for ClassSet {
    fn class_names(&self) -> impl Iterator<Item = &str> {
        self.iter()
    }
}

/// Compiles stylesheets from one compile context.
///
/// Builds do not mutate anything except the resolution cache, so one
/// compiler can serve many builds, also from several threads.
#[derive(Debug)]
pub struct Compiler {
    context: CompileContext,
    cache: ResolutionCache,
    options: BuildOptions,
}

impl Compiler {
    pub fn new(context: CompileContext) -> Self {
        Self {
            context,
            cache: ResolutionCache::new(),
            options: BuildOptions::default(),
        }
    }

    /// Normalize `config` and create a compiler for it.
    pub fn from_config(config: Config) -> Result<Self> {
        Ok(Self::new(CompileContext::from_config(config)?))
    }

    /// Read a configuration file and create a compiler for it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(CompileContext::load(path)?))
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn context(&self) -> &CompileContext {
        &self.context
    }

    /// Replace the context after a configuration change.
    ///
    /// Cached resolutions of the old context are dropped.
    pub fn set_context(&mut self, context: CompileContext) {
        self.cache.retain_version(context.version());
        self.context = context;
    }

    fn expander(&self) -> MacroExpander<'_> {
        MacroExpander::new(&self.context).with_overrides(&self.options.variable_overrides)
    }

    /// Overrides change resolved values without changing the context version,
    /// so builds with overrides never touch the cache.
    fn caches(&self) -> bool {
        self.options.variable_overrides.is_empty()
    }

    fn resolve_cached(
        &self,
        name: &str,
        origin: RuleOrigin,
        hits: &AtomicUsize,
        resolve: impl FnOnce() -> Result<ResolvedRule>,
    ) -> Result<Arc<ResolvedRule>> {
        if !self.caches() {
            return resolve().map(Arc::new);
        }

        let key = ResolutionCacheKey::new(name, origin, self.context.version());
        if let Some(rule) = self.cache.get(&key) {
            hits.fetch_add(1, Ordering::Relaxed);
            return Ok(rule);
        }

        let rule = Arc::new(resolve()?);
        self.cache.insert(key, Arc::clone(&rule));
        Ok(rule)
    }

    /// Resolve a single component by name.
    pub fn resolve_component(&self, name: &str) -> Result<Arc<ResolvedRule>> {
        let hits = AtomicUsize::new(0);
        let expander = self.expander();
        self.resolve_cached(name, RuleOrigin::Component, &hits, || {
            expander.expand_component(name)
        })
    }

    /// Build a stylesheet for the requested class names.
    ///
    /// Every plain selector is emitted. Of the requested names, those that
    /// are defined components are emitted in first-seen order; others are
    /// skipped. Definitions that fail to resolve are left out of the
    /// stylesheet and reported in [`Build::diagnostics`].
    #[tracing::instrument(level = "debug", skip_all, fields(context = self.context.version()))]
    pub fn build<S>(&self, requested: &S) -> Build
    where
        S: SelectorSource + ?Sized,
    {
        let components = self.requested_components(requested);
        let expander = self.expander();
        let hits = AtomicUsize::new(0);

        let plain: Vec<Result<Arc<ResolvedRule>>> = self
            .context
            .plain_selectors()
            .par_iter()
            .map(|definition| {
                self.resolve_cached(&definition.selector, RuleOrigin::PlainSelector, &hits, || {
                    expander.expand_plain_selector(definition)
                })
            })
            .collect();

        let resolved: Vec<Result<Arc<ResolvedRule>>> = components
            .par_iter()
            .map(|name| {
                self.resolve_cached(name, RuleOrigin::Component, &hits, || {
                    expander.expand_component(name)
                })
            })
            .collect();

        let mut rules = Vec::with_capacity(plain.len() + resolved.len());
        let mut diagnostics = Vec::new();
        for result in plain.into_iter().chain(resolved) {
            match result {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    tracing::warn!(target: targets::BUILD, %error, "rule omitted from build");
                    diagnostics.push(error);
                }
            }
        }

        let custom_properties = if self.options.emit_custom_properties {
            self.custom_properties(&mut diagnostics)
        } else {
            Vec::new()
        };

        let css = Emitter::new(self.context.breakpoints(), self.options.emit_options())
            .emit(&rules, &custom_properties);

        tracing::debug!(
            target: targets::BUILD,
            requested = components.len(),
            rules = rules.len(),
            cache_hits = hits.load(Ordering::Relaxed),
            diagnostics = diagnostics.len(),
            bytes = css.len(),
            "build finished"
        );

        Build {
            css,
            rules,
            diagnostics,
        }
    }

    /// Resolve every definition and variable without emitting anything.
    ///
    /// Returns all diagnostics, including those of components no build has
    /// requested yet.
    #[tracing::instrument(level = "debug", skip_all, fields(context = self.context.version()))]
    pub fn validate(&self) -> Vec<Error> {
        let expander = self.expander();
        let hits = AtomicUsize::new(0);

        let mut diagnostics: Vec<Error> = self
            .context
            .plain_selectors()
            .par_iter()
            .filter_map(|definition| {
                self.resolve_cached(&definition.selector, RuleOrigin::PlainSelector, &hits, || {
                    expander.expand_plain_selector(definition)
                })
                .err()
            })
            .collect();

        let names: Vec<&str> = self
            .context
            .components()
            .iter()
            .map(|(_, definition)| definition.name.as_str())
            .collect();
        diagnostics.extend(
            names
                .par_iter()
                .filter_map(|name| {
                    self.resolve_cached(name, RuleOrigin::Component, &hits, || {
                        expander.expand_component(name)
                    })
                    .err()
                })
                .collect::<Vec<_>>(),
        );

        self.custom_properties(&mut diagnostics);

        tracing::debug!(
            target: targets::BUILD,
            diagnostics = diagnostics.len(),
            "validated configuration"
        );
        diagnostics
    }

    /// Resolved value of every variable, overrides included.
    fn custom_properties(&self, diagnostics: &mut Vec<Error>) -> Vec<(String, String)> {
        let overrides = &self.options.variable_overrides;
        let resolver = VariableResolver::new(self.context.variables()).with_overrides(overrides);

        let names = self.context.variables().iter().map(|(name, _)| name).chain(
            overrides
                .iter()
                .map(|(name, _)| name)
                .filter(|name| !self.context.variables().contains(name)),
        );

        let mut properties = Vec::new();
        for name in names {
            let location = Location::new(Section::Variables, name);
            match resolver.resolve(&format!("${name}"), &location) {
                Ok(value) => properties.push((name.to_owned(), value)),
                Err(error) => {
                    tracing::warn!(target: targets::BUILD, %error, "variable omitted");
                    diagnostics.push(error);
                }
            }
        }
        properties
    }

    /// Requested names that are defined components, de-duplicated.
    fn requested_components<'s, S>(&self, requested: &'s S) -> Vec<&'s str>
    where
        S: SelectorSource + ?Sized,
    {
        let mut seen = HashSet::new();
        requested
            .class_names()
            .filter(|name| seen.insert(*name))
            .filter(|name| {
                let defined = self.context.components().id_of(name).is_some();
                if !defined {
                    tracing::trace!(target: targets::BUILD, class = *name, "not a component");
                }
                defined
            })
            .collect()
    }
}
