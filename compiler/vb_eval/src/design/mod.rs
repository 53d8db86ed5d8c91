//! A design file and every way to evaluate it.
//!
//! # Pipeline
//!
//! A full parse runs these phases, each collecting every error it finds
//! before the parse is abandoned:
//!
//! 1. **Read**: split the source into statements.
//! 2. **Classify**: decide each statement's kind, claim namespaces and add
//!    library directories.
//! 3. **Expand**: rewrite vectors, constants and concatenations into bits,
//!    then validate the module declaration and every instantiation.
//! 4. **Init**: register variables, dependencies and expressions in a fresh
//!    [`Database`].
//! 5. **Build**: create the [`Statement`] list and evaluate it.
//!
//! A design with any error produces no output at all; the diagnostics
//! describe what went wrong.
//!
//! # Interactive entry points
//!
//! After a successful parse the database stays alive, so clicks and ticks
//! only change values and re-render:
//!
//! ```text
//! flip/tick -> reevaluate -> alternate clocks -> submodules -> render
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use vb_diagnostic::{Diagnostic, DiagnosticQueue, ErrorGuaranteed};
use vb_lexer_core::lexeme::{self, Markers};
use vb_lexer_core::{read_statements, SourceStatement};
use vb_parse::errors as parse_errors;
use vb_parse::{
    classify, comment_parts, find_module_declaration, library_path, pieces, Classified,
    ExpandedStatement, Expander, ModuleSignature, Namespace, SearchPath, StatementKind,
    DESIGN_EXTENSION,
};

use crate::database::{next_value_name, Database};
use crate::errors::{self, DesignError};
use crate::expr::Assignment;
use crate::statement::{Statement, StatementBody, Submodule, NO_CONTACT};
use crate::{CycleDetection, OutputToken, Settings, Variable, VariableKind};

/// A design found for an instantiation.
#[derive(Clone, Debug)]
pub(crate) struct Subdesign {
    pub(crate) path: PathBuf,
    pub(crate) source: String,
    pub(crate) signature: ModuleSignature,
}

impl Subdesign {
    pub(crate) fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

/// One `.vbi` design.
#[derive(Debug)]
pub struct Design {
    name: String,
    source: String,
    settings: Settings,
    /// Submodule nesting level; 0 for the design the user opened.
    depth: u32,
    search_path: SearchPath,
    /// Expanded text of the design's module declaration.
    module_declaration: Option<String>,
    database: Database,
    expanded: Vec<ExpandedStatement>,
    statements: Vec<Statement>,
    subdesigns: FxHashMap<String, Subdesign>,
    /// Instance name -> line of its instantiation.
    instantiations: FxHashMap<String, u32>,
    diagnostics: DiagnosticQueue,
    /// Set once a full parse succeeds; cleared when one fails.
    parsed: bool,
}

impl Design {
    /// Load a design file. The design's name is the file stem.
    pub fn from_file(path: &Path, settings: Settings) -> Result<Design, DesignError> {
        let is_design = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DESIGN_EXTENSION));
        let name = path.file_stem().and_then(|stem| stem.to_str());
        let (true, Some(name)) = (is_design, name) else {
            return Err(DesignError::NotADesign {
                path: path.to_path_buf(),
            });
        };
        let source = std::fs::read_to_string(path).map_err(|source| DesignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Design::from_source(name, dir, source, settings))
    }

    /// A design named `name` whose submodules and libraries resolve
    /// against `dir`.
    pub fn from_source(
        name: &str,
        dir: impl Into<PathBuf>,
        source: impl Into<String>,
        settings: Settings,
    ) -> Design {
        let dir = dir.into();
        Design {
            name: name.to_owned(),
            source: source.into(),
            settings,
            depth: 0,
            search_path: SearchPath::new(dir),
            module_declaration: None,
            database: Database::new(&settings),
            expanded: Vec::new(),
            statements: Vec::new(),
            subdesigns: FxHashMap::default(),
            instantiations: FxHashMap::default(),
            diagnostics: DiagnosticQueue::new(),
            parsed: false,
        }
    }

    #[must_use]
    pub(crate) fn nested(mut self, depth: u32) -> Design {
        self.depth = depth;
        self
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Expanded text of the module declaration, after a successful parse.
    pub fn module_declaration(&self) -> Option<&str> {
        self.module_declaration.as_deref()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn expanded(&self) -> &[ExpandedStatement] {
        &self.expanded
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Diagnostics of the last operation, in the order they were found.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.peek()
    }

    /// Diagnostics of the last operation as `"{line}: {message}"`.
    pub fn error_lines(&self) -> Vec<String> {
        self.diagnostics.lines()
    }

    /// Every variable in first-registration order.
    pub fn export_state(&self) -> Vec<Variable> {
        self.database.variables().to_vec()
    }

    // === Entry points ===

    /// Full parse: rebuild everything from source and render.
    #[tracing::instrument(level = "debug", skip_all, fields(design = %self.name))]
    pub fn parse(&mut self) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.initialize(None)?;
        self.run_submodules()?;
        self.database.update_alt_clocks();
        Ok(self.render())
    }

    /// Toggle one independent variable and propagate.
    #[tracing::instrument(level = "debug", skip(self), fields(design = %self.name))]
    pub fn parse_click(&mut self, name: &str) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.begin_interaction()?;
        if !self.is_clickable(name) || self.database.flip_value(name).is_err() {
            return Err(self.diagnostics.emit_error(errors::not_clickable(name)));
        }
        self.propagate()
    }

    /// One primary clock edge.
    #[tracing::instrument(level = "debug", skip_all, fields(design = %self.name))]
    pub fn parse_tick(&mut self) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.begin_interaction()?;
        self.database.tick_primary();
        self.propagate()
    }

    /// `count` primary clock edges; returns the output after the last one.
    pub fn tick_n(&mut self, count: usize) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        if count == 0 {
            self.begin_interaction()?;
            return Ok(self.render());
        }
        let mut output = Vec::new();
        for _ in 0..count {
            output = self.parse_tick()?;
        }
        Ok(output)
    }

    /// Set a formatter's independent bits to the binary text `next_value`,
    /// most significant first, and propagate.
    pub fn click_formatter(
        &mut self,
        variables: &[String],
        next_value: &str,
    ) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.begin_interaction()?;
        if let Some(name) = variables.iter().find(|name| !self.is_clickable(name)) {
            return Err(self.diagnostics.emit_error(errors::not_clickable(name)));
        }
        for (name, digit) in variables.iter().zip(next_value.chars()) {
            let _ = self.database.set_value(name, digit == '1');
        }
        self.propagate()
    }

    /// Full parse, then give each listed independent variable its value.
    ///
    /// Used to open a subdesign with the live inputs of one instance.
    pub fn parse_with_input(
        &mut self,
        variables: &[(String, bool)],
    ) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.initialize(None)?;
        for (name, value) in variables {
            if self.is_clickable(name) {
                let _ = self.database.set_value(name, *value);
            }
        }
        // Bound inputs are not a clock edge. Alternate clocks are only
        // resampled.
        self.database.reevaluate();
        self.run_submodules()?;
        self.database.update_alt_clocks();
        Ok(self.render())
    }

    /// Evaluate this design as a submodule and return its output values in
    /// declaration order.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(design = %self.name, depth = self.depth)
    )]
    pub fn parse_as_module(&mut self, inputs: &[bool]) -> Result<Vec<bool>, ErrorGuaranteed> {
        self.initialize(Some(inputs))?;
        self.run_submodules()?;
        self.database.update_alt_clocks();

        let outputs = self
            .module_declaration
            .as_deref()
            .and_then(ModuleSignature::parse)
            .map(|signature| signature.outputs)
            .unwrap_or_default();
        Ok(outputs
            .iter()
            .map(|name| self.database.get_value(name))
            .collect())
    }

    /// Live inputs of `instance`, named after the child declaration's
    /// inputs.
    pub fn module_inputs(&self, instance: &str) -> Option<Vec<(String, bool)>> {
        let submodule = self.statements.iter().find_map(|statement| match &statement.body {
            StatementBody::Submodule(submodule) if submodule.instance == instance => {
                Some(submodule)
            }
            _ => None,
        })?;
        let subdesign = self.subdesigns.get(&submodule.design)?;
        let values = submodule.input_values(&self.database);
        Some(
            subdesign
                .signature
                .inputs
                .iter()
                .cloned()
                .zip(values)
                .collect(),
        )
    }

    /// Path of the design file an instantiation refers to.
    pub fn subdesign_path(&self, design: &str) -> Option<&Path> {
        self.subdesigns.get(design).map(|sub| sub.path.as_path())
    }

    /// Clear the previous operation's diagnostics. Clicks and ticks need
    /// the state of a successful full parse.
    fn begin_interaction(&mut self) -> Result<(), ErrorGuaranteed> {
        self.diagnostics.flush();
        if self.parsed {
            Ok(())
        } else {
            Err(self.diagnostics.emit_error(errors::not_parsed(&self.name)))
        }
    }

    fn is_clickable(&self, name: &str) -> bool {
        self.database
            .variable(name)
            .is_some_and(|variable| variable.kind.is_independent())
    }

    // === Propagation ===

    /// After independent values changed: settle expressions, fire
    /// alternate clocks, run submodules, render.
    fn propagate(&mut self) -> Result<Vec<OutputToken>, ErrorGuaranteed> {
        self.database.reevaluate();
        let fired = self.database.tick_alt_clocks();
        self.database.update_alt_clocks();
        if fired {
            self.database.reevaluate();
        }
        self.run_submodules()?;
        Ok(self.render())
    }

    /// Run every instantiation. Outputs can feed parent expressions, so the
    /// parent is re-evaluated once more if any ran.
    fn run_submodules(&mut self) -> Result<bool, ErrorGuaranteed> {
        let mut ran = false;
        for statement in &mut self.statements {
            let StatementBody::Submodule(submodule) = &mut statement.body else {
                continue;
            };
            let Some(subdesign) = self.subdesigns.get(&submodule.design) else {
                let missing = errors::design_not_found(&submodule.design, statement.line);
                return Err(self.diagnostics.emit_error(missing));
            };
            if let Err(diagnostics) = submodule.run(
                subdesign,
                &mut self.database,
                &self.settings,
                self.depth,
                statement.line,
            ) {
                let mut diagnostics = diagnostics.into_iter();
                let first = diagnostics.next().unwrap_or_else(|| {
                    errors::internal("submodule failed without a diagnostic", statement.line)
                });
                let guarantee = self.diagnostics.emit_error(first);
                for diagnostic in diagnostics {
                    self.diagnostics.add(diagnostic);
                }
                return Err(guarantee);
            }
            ran = true;
        }
        if ran {
            self.database.reevaluate();
        }
        Ok(ran)
    }

    fn render(&self) -> Vec<OutputToken> {
        let mut out = Vec::new();
        for statement in &self.statements {
            statement.render(&self.database, &self.settings, &mut out);
        }
        out
    }

    // === Full parse ===

    /// Rebuild the database and statements from source. `inputs` binds the
    /// module declaration's inputs when evaluating as a submodule.
    fn initialize(&mut self, inputs: Option<&[bool]>) -> Result<(), ErrorGuaranteed> {
        self.diagnostics.flush();
        self.database = Database::new(&self.settings);
        self.search_path = SearchPath::new(self.search_path.design_dir().to_path_buf());
        self.module_declaration = None;
        self.expanded.clear();
        self.statements.clear();
        self.subdesigns.clear();
        self.instantiations.clear();

        let source = std::mem::take(&mut self.source);
        let result = self.build(&source, inputs);
        self.source = source;
        self.parsed = result.is_ok();
        if !self.parsed {
            self.database = Database::new(&self.settings);
            self.module_declaration = None;
            self.expanded.clear();
            self.statements.clear();
            self.subdesigns.clear();
            self.instantiations.clear();
        }
        result
    }

    fn build(&mut self, source: &str, inputs: Option<&[bool]>) -> Result<(), ErrorGuaranteed> {
        let statements = read_statements(source)
            .map_err(|error| self.diagnostics.emit_error(parse_errors::read_error(&error)))?;
        let classified = self.classify_all(&statements)?;
        self.expand_all(&classified)?;
        self.validate_modules()?;
        if let Some(inputs) = inputs {
            self.bind_inputs(inputs)?;
        }
        self.init_source()?;
        self.build_statements();
        self.database.reevaluate();
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(count = statements.len()))]
    fn classify_all<'s>(
        &mut self,
        statements: &[SourceStatement<'s>],
    ) -> Result<Vec<Classified<'s>>, ErrorGuaranteed> {
        let mut classified = Vec::with_capacity(statements.len());
        for statement in statements {
            match classify(statement, &self.name, self.database.namespace_mut()) {
                Ok(statement) => {
                    if statement.kind == StatementKind::Library {
                        self.add_library(&statement);
                    }
                    classified.push(statement);
                }
                Err(diagnostic) => {
                    self.diagnostics.add(diagnostic);
                }
            }
        }
        self.abort_on_errors()?;
        Ok(classified)
    }

    fn add_library(&mut self, statement: &Classified<'_>) {
        let Some(path) = library_path(statement.text) else {
            return;
        };
        if self.search_path.add_library(path).is_err() {
            self.diagnostics
                .add(parse_errors::library_not_found(statement.line, path));
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn expand_all(&mut self, classified: &[Classified<'_>]) -> Result<(), ErrorGuaranteed> {
        let mut expander = Expander::new();
        for statement in classified {
            match expander.expand(statement, self.database.namespace()) {
                Ok(lines) => self.expanded.extend(lines),
                Err(diagnostic) => {
                    self.diagnostics.add(diagnostic);
                }
            }
        }
        self.abort_on_errors()
    }

    /// Find the module declaration and resolve every instantiation.
    fn validate_modules(&mut self) -> Result<(), ErrorGuaranteed> {
        let modules: Vec<(StatementKind, String, u32)> = self
            .expanded
            .iter()
            .filter(|statement| statement.kind.is_module())
            .map(|statement| (statement.kind, statement.text.clone(), statement.line))
            .collect();
        for (kind, text, line) in modules {
            if kind == StatementKind::Module {
                if self.module_declaration.is_some() {
                    self.diagnostics
                        .add(errors::multiple_module_declarations(line));
                } else {
                    self.module_declaration = Some(text);
                }
                continue;
            }
            if let Err(diagnostic) = self.validate_instantiation(&text, line) {
                self.diagnostics.add(diagnostic);
            }
        }
        self.abort_on_errors()
    }

    fn validate_instantiation(&mut self, text: &str, line: u32) -> Result<(), Diagnostic> {
        let signature = ModuleSignature::parse(text)
            .ok_or_else(|| errors::internal("unreadable instantiation", line))?;
        let (design, instance) = signature
            .instance()
            .ok_or_else(|| errors::internal("instantiation without an instance name", line))?;

        if design == self.name {
            return Err(errors::instantiate_current_design(line));
        }
        if self.instantiations.contains_key(instance) {
            return Err(errors::instance_name_used(instance, line));
        }

        if !self.subdesigns.contains_key(design) {
            let path = self
                .search_path
                .locate(design)
                .ok_or_else(|| errors::design_not_found(design, line))?;
            let source = std::fs::read_to_string(&path)
                .map_err(|_| errors::unreadable_design(design, line))?;
            let child = declaration_signature(design, &source)
                .ok_or_else(|| errors::design_not_found(design, line))?;
            tracing::debug!(design, path = %path.display(), "subdesign found");
            self.subdesigns.insert(
                design.to_owned(),
                Subdesign {
                    path,
                    source,
                    signature: child,
                },
            );
        }

        let child = self
            .subdesigns
            .get(design)
            .map(|sub| sub.signature.arity());
        if child != Some(signature.arity()) {
            return Err(errors::arity_mismatch(line));
        }
        self.instantiations.insert(instance.to_owned(), line);
        Ok(())
    }

    /// Register the module declaration's inputs with the given values before
    /// anything else can claim them.
    fn bind_inputs(&mut self, inputs: &[bool]) -> Result<(), ErrorGuaranteed> {
        let Some(signature) = self
            .module_declaration
            .as_deref()
            .and_then(ModuleSignature::parse)
        else {
            return Err(self
                .diagnostics
                .emit_error(errors::missing_module_declaration(&self.name)));
        };
        let line = self.declaration_line();
        if signature.inputs.len() != inputs.len() {
            return Err(self.diagnostics.emit_error(errors::arity_mismatch(line)));
        }
        for (name, &value) in signature.inputs.iter().zip(inputs) {
            if let Err(error) = self
                .database
                .add_variable(VariableKind::Independent, name, value)
            {
                self.diagnostics.add(errors::from_database(&error, line));
            }
        }
        self.abort_on_errors()
    }

    fn declaration_line(&self) -> u32 {
        self.expanded
            .iter()
            .find(|statement| statement.kind == StatementKind::Module)
            .map_or(0, |statement| statement.line)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(count = self.expanded.len()))]
    fn init_source(&mut self) -> Result<(), ErrorGuaranteed> {
        let expanded = std::mem::take(&mut self.expanded);
        for statement in &expanded {
            if let Err(diagnostic) = self.init_statement(statement) {
                self.diagnostics.add(diagnostic);
            }
        }
        self.expanded = expanded;

        if self.settings.cycle_detection == CycleDetection::Full {
            if let Err(error) = self.database.check_cycles() {
                self.diagnostics.add(errors::from_database(&error, 0));
            }
        }
        self.verify_module_declaration();
        self.abort_on_errors()
    }

    fn init_statement(&mut self, statement: &ExpandedStatement) -> Result<(), Diagnostic> {
        let line = statement.line;
        let db = &mut self.database;
        match statement.kind {
            StatementKind::Comment | StatementKind::Empty | StatementKind::Library => {}
            StatementKind::VariableList
            | StatementKind::FormatSpecifier
            | StatementKind::Module => {
                for (name, markers) in scalars(&statement.text, statement.kind.is_module()) {
                    db.ensure_independent(name, markers.is_starred());
                }
            }
            StatementKind::Submodule => {
                let signature = ModuleSignature::parse(&statement.text)
                    .ok_or_else(|| errors::internal("unreadable instantiation", line))?;
                for input in &signature.inputs {
                    if let Some(scalar) = lexeme::scalar(input) {
                        db.ensure_independent(scalar.ident, false);
                    }
                }
                for output in signature.outputs.iter().filter(|name| *name != NO_CONTACT) {
                    db.ensure_dependent(output);
                    db.claim_driver(output, line)
                        .map_err(|error| errors::from_database(&error, line))?;
                }
            }
            StatementKind::Boolean => {
                let assignment = Assignment::parse(&statement.text)
                    .map_err(|error| errors::internal(error, line))?;
                let inputs = assignment.rhs.variables();
                for target in &assignment.targets {
                    db.ensure_dependent(target);
                    db.claim_driver(target, line)
                        .map_err(|error| errors::from_database(&error, line))?;
                }
                for input in &inputs {
                    db.ensure_independent(input, false);
                }
                for target in &assignment.targets {
                    db.try_add_dependency_list(target, inputs.clone())
                        .map_err(|error| errors::from_database(&error, line))?;
                }
                let stores = assignment.targets.clone();
                db.add_expression(stores, assignment, line);
            }
            StatementKind::Clock => {
                let assignment = Assignment::parse(&statement.text)
                    .map_err(|error| errors::internal(error, line))?;
                let inputs = assignment.rhs.variables();
                let mut stores = Vec::with_capacity(assignment.targets.len());
                for register in &assignment.targets {
                    db.add_variable(VariableKind::Independent, register, false)
                        .map_err(|error| errors::from_database(&error, line))?;
                    db.claim_driver(register, line)
                        .map_err(|error| errors::from_database(&error, line))?;
                    let next = next_value_name(register);
                    db.add_variable(VariableKind::Dependent, &next, false)
                        .map_err(|error| errors::from_database(&error, line))?;
                    stores.push(next);
                }
                for input in &inputs {
                    db.ensure_independent(input, false);
                }
                for next in &stores {
                    db.try_add_dependency_list(next, inputs.clone())
                        .map_err(|error| errors::from_database(&error, line))?;
                }
                let alt = assignment.clock.clone().flatten();
                if let Some(alt) = &alt {
                    db.ensure_independent(alt, false);
                }
                let registers = assignment.targets.clone();
                db.add_expression(stores, assignment, line);
                db.add_clock(registers, alt);
            }
        }
        Ok(())
    }

    /// Module inputs must be independent variables of the design.
    fn verify_module_declaration(&mut self) {
        let Some(signature) = self
            .module_declaration
            .as_deref()
            .and_then(ModuleSignature::parse)
        else {
            return;
        };
        let line = self.declaration_line();
        for input in &signature.inputs {
            let independent = self
                .database
                .variable(input)
                .is_some_and(|variable| variable.kind.is_independent());
            if !independent {
                self.diagnostics
                    .add(errors::not_independent_input(input, line));
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn build_statements(&mut self) {
        let mut next_expression = 0;
        for expanded in &self.expanded {
            let body = match expanded.kind {
                StatementKind::Boolean => {
                    next_expression += 1;
                    StatementBody::Boolean {
                        expression: next_expression - 1,
                    }
                }
                StatementKind::Clock => {
                    next_expression += 1;
                    StatementBody::Clock {
                        expression: next_expression - 1,
                    }
                }
                StatementKind::FormatSpecifier => StatementBody::Display,
                StatementKind::Module => StatementBody::Module,
                StatementKind::VariableList => StatementBody::VariableList,
                StatementKind::Empty => StatementBody::Empty,
                StatementKind::Library => StatementBody::Library,
                StatementKind::Comment => match comment_parts(&expanded.text) {
                    Some(parts) => StatementBody::Comment {
                        visibility: parts.visibility,
                        spacing: parts.spacing.to_owned(),
                        text: parts.text.to_owned(),
                    },
                    None => StatementBody::Empty,
                },
                StatementKind::Submodule => {
                    let Some(signature) = ModuleSignature::parse(&expanded.text) else {
                        continue;
                    };
                    let Some((design, instance)) = signature.instance() else {
                        continue;
                    };
                    let (design, instance) = (design.to_owned(), instance.to_owned());
                    StatementBody::Submodule(Submodule::new(
                        design,
                        instance,
                        signature.inputs,
                        signature.outputs,
                    ))
                }
            };
            self.statements.push(Statement {
                line: expanded.line,
                text: expanded.text.clone(),
                body,
            });
        }
        tracing::debug!(
            statements = self.statements.len(),
            variables = self.database.variables().len(),
            "design built"
        );
    }

    fn abort_on_errors(&self) -> Result<(), ErrorGuaranteed> {
        match self.diagnostics.has_errors() {
            Some(guarantee) => Err(guarantee),
            None => Ok(()),
        }
    }
}

/// Scalars named by a statement, with their markers. Module statements
/// only name variables inside their parentheses.
fn scalars(text: &str, module: bool) -> Vec<(&str, Markers<'_>)> {
    let body = match text.find('(') {
        Some(open) if module => &text[open + 1..],
        _ => text,
    };
    pieces(body)
        .into_iter()
        .filter(|piece| piece.is_lexeme())
        .filter_map(|piece| lexeme::scalar(piece.text))
        .map(|scalar| (scalar.ident, scalar.markers))
        .collect()
}

/// Signature of `design`'s module declaration, expanded in the context of
/// the rest of that design so `name[]` resolves.
fn declaration_signature(design: &str, source: &str) -> Option<ModuleSignature> {
    let (line, text) = find_module_declaration(source, design)?;
    let mut namespace = Namespace::new();
    if let Ok(statements) = read_statements(source) {
        for statement in &statements {
            let _ = classify(statement, design, &mut namespace);
        }
    }
    let statement = SourceStatement { text: &text, line };
    let classified = classify(&statement, design, &mut namespace).ok()?;
    if classified.kind != StatementKind::Module {
        return None;
    }
    let expanded = Expander::new().expand(&classified, &namespace).ok()?;
    ModuleSignature::parse(&expanded.first()?.text)
}

#[cfg(test)]
mod tests;
