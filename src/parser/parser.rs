//! Statement Evaluator driver.
//!
//! The token stream is cut into statements at `;`, `{` and `}`. Each
//! statement is dispatched on its first non-modifier token to a handler
//! from the lookup tables, and block bodies are collected into frames until
//! their closing brace.
//!
//! The same handlers run twice over the whole stream:
//!
//! - a skim pass that checks placement and registers modules, functions and
//!   globals so later code can refer to them
//! - an evaluate pass that resolves names, checks types and builds the AST
//!
//! The evaluate pass only runs when the skim pass reported nothing.
//!
//! Expressions are parsed with a Pratt parser driven by the NUD/LED tables;
//! see `expr.rs`.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::{
    ast::{
        ast::Stmt,
        expressions::TypedExpr,
        statements::{ElseBranch, IfStmt},
        types::{Datatype, Modifier},
    },
    config::{AnalyzerConfig, Boundary},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
    symbols::{
        symbols::{describe_arguments, split_qualified, ModuleId, SymbolTable},
        variable::Variable,
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    scope::{ScopeKind, ScopeStack},
    stmt::{parse_if_stmt, parse_statement, retry_deferred_global, split_modifiers, DeferredGlobal},
};

/// Where a resolved variable lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableSlot {
    Local((usize, usize)),
    Global(ModuleId),
}

#[derive(Debug, Clone)]
pub struct ResolvedVariable {
    pub slot: VariableSlot,
    pub variable: Variable,
}

/// Whether an `else` may follow the last statement of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
enum IfChain {
    Closed,
    /// The last statement is an `if` whose chain can still take an `else`.
    Open,
    /// The last block was an `if` whose header failed; an `else` is
    /// accepted but has nothing to attach to.
    Detached,
}

#[derive(Debug)]
enum BlockOwner {
    Stmt(Stmt),
    ElseIf(IfStmt),
    Else,
    Failed(ScopeKind),
}

#[derive(Debug)]
struct Frame {
    owner: Option<BlockOwner>,
    body: Vec<Stmt>,
    chain: IfChain,
}

impl Frame {
    fn new(owner: Option<BlockOwner>) -> Self {
        Frame {
            owner,
            body: vec![],
            chain: IfChain::Closed,
        }
    }

    fn attach_else(&mut self, branch: ElseBranch) -> bool {
        if self.chain != IfChain::Open {
            return false;
        }
        match self.body.last_mut() {
            Some(Stmt::If(stmt)) => match stmt.last_open_mut() {
                Some(open) => {
                    open.else_branch = Some(branch);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// The scope a block opened by a statement starting with `kind` creates.
pub fn block_kind(kind: TokenKind) -> Option<ScopeKind> {
    match kind {
        TokenKind::Module => Some(ScopeKind::Module),
        TokenKind::Fn => Some(ScopeKind::Function),
        TokenKind::If | TokenKind::Else => Some(ScopeKind::If),
        TokenKind::While => Some(ScopeKind::While),
        TokenKind::For => Some(ScopeKind::For),
        _ => None,
    }
}

fn set_body(stmt: &mut Stmt, body: Vec<Stmt>) {
    match stmt {
        Stmt::CreateModule(module) => module.body = body,
        Stmt::FunctionDefinition(function) => function.body = body,
        Stmt::If(stmt) => stmt.body = body,
        Stmt::While(stmt) => stmt.body = body,
        Stmt::ForFakeScope(stmt) => stmt.body = body,
        _ => {}
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Tokens of the expression currently being parsed, ending in EOF
    tokens: Vec<Token>,
    /// Current position in `tokens`
    pos: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    diagnostics: Diagnostics,
    scopes: ScopeStack,
    symbols: SymbolTable,
    frames: Vec<Frame>,
    deferred: Vec<DeferredGlobal>,
    config: &'a AnalyzerConfig,
    /// Standard-library mode, cleared by `STANDARDLIB_FINISH_CODE;`
    stdlib: bool,
    skimming: bool,
}

impl<'a> Parser<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        let symbols = SymbolTable::new();
        let scopes = ScopeStack::new(symbols.root());
        Parser {
            tokens: vec![],
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            diagnostics: Diagnostics::new(config.max_errors),
            scopes,
            symbols,
            frames: vec![],
            deferred: vec![],
            config,
            stdlib: config.stdlib,
            skimming: true,
        }
    }

    // EXPRESSION CURSOR

    /// Loads the tokens of one expression. An EOF token positioned at the
    /// end of the slice (or at `context` when it is empty) terminates it.
    pub fn load_expression(&mut self, tokens: &[Token], context: &Token) {
        let span = tokens.last().unwrap_or(context).span.clone();
        self.tokens = tokens.to_vec();
        self.tokens.push(Token {
            kind: TokenKind::EOF,
            value: String::from("end of expression"),
            span,
        });
        self.pos = 0;
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// The token `offset` places after the current one.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: expected.to_string(),
                    found: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }
        Ok(self.advance())
    }

    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn current_bp(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    // STATE

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeStack {
        &mut self.scopes
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn is_skimming(&self) -> bool {
        self.skimming
    }

    pub fn is_stdlib(&self) -> bool {
        self.stdlib
    }

    pub fn finish_stdlib(&mut self) {
        debug!("standard library finished");
        self.stdlib = false;
    }

    // DIAGNOSTICS

    pub fn report(&mut self, error: Error) {
        self.diagnostics.report(error);
    }

    pub fn error(&mut self, error: ErrorImpl, token: &Token) {
        self.report(Error::new(error, token.span.start.clone()));
    }

    /// Reports `expected` unless `tokens[index]` is one of `kinds`.
    pub fn expect_at<'t>(
        &mut self,
        tokens: &'t [Token],
        index: usize,
        kinds: &[TokenKind],
        expected: &str,
    ) -> Option<&'t Token> {
        match tokens.get(index) {
            Some(token) if token.is_one_of_many(kinds) => Some(token),
            Some(token) => {
                self.error(
                    ErrorImpl::ExpectedToken {
                        expected: expected.to_string(),
                        found: token.value.clone(),
                    },
                    token,
                );
                None
            }
            None => {
                let position = tokens
                    .last()
                    .map(|token| token.span.end.clone())
                    .unwrap_or_else(Position::null);
                self.report(Error::new(
                    ErrorImpl::ExpectedToken {
                        expected: expected.to_string(),
                        found: String::from("end of statement"),
                    },
                    position,
                ));
                None
            }
        }
    }

    /// Rejects any modifier on a statement that takes none.
    pub fn reject_modifiers(&mut self, modifiers: &[Token]) -> Option<()> {
        match modifiers.first() {
            Some(modifier) => {
                self.error(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: modifier.value.clone(),
                        message: String::from("this statement takes no modifiers"),
                    },
                    modifier,
                );
                None
            }
            None => Some(()),
        }
    }

    /// Rejects the first modifier `invalid` matches.
    pub fn reject_invalid_modifiers(
        &mut self,
        modifiers: &[Token],
        target: &str,
        invalid: fn(Modifier) -> bool,
    ) -> Option<()> {
        match modifiers
            .iter()
            .find(|token| Modifier::of(token.kind).is_some_and(invalid))
        {
            Some(token) => {
                self.error(
                    ErrorImpl::InvalidModifier {
                        target: target.to_string(),
                        modifier: token.value.clone(),
                    },
                    token,
                );
                None
            }
            None => Some(()),
        }
    }

    /// Requires the statement to be inside a function.
    pub fn require_function(&mut self, token: &Token, what: &str) -> Option<()> {
        if self.scopes.in_function() {
            return Some(());
        }
        self.error(
            ErrorImpl::IllegalPlacement {
                message: format!("{} must be inside of a function", what),
            },
            token,
        );
        None
    }

    // RESOLUTION

    fn access_allowed(&self, owner: ModuleId, modifiers: &[Modifier]) -> bool {
        let from = self.scopes.current_module();
        match self.config.access.boundary_for(modifiers) {
            None => true,
            Some(Boundary::SameModule) => from == owner,
            Some(Boundary::Subtree) => self.symbols.is_ancestor_or_self(owner, from),
            Some(Boundary::Siblings) => {
                let base = self.symbols.module(owner).parent.unwrap_or(owner);
                self.symbols.is_ancestor_or_self(base, from)
            }
        }
    }

    /// Checks a reference to a declaration of `owner` against the access policy.
    pub fn check_access(
        &self,
        owner: ModuleId,
        kind: &str,
        modifiers: &[Modifier],
        identifier: &Token,
    ) -> Result<(), Error> {
        if self.access_allowed(owner, modifiers) {
            return Ok(());
        }
        Err(Error::new(
            ErrorImpl::AccessViolation {
                kind: kind.to_string(),
                name: identifier.value.clone(),
                from: self.symbols.path_of(self.scopes.current_module()),
            },
            identifier.span.start.clone(),
        ))
    }

    /// Resolves a variable: locals of the current function first, then
    /// globals through the module tree.
    pub fn find_variable(&self, identifier: &Token) -> Result<ResolvedVariable, Error> {
        if !identifier.value.contains('.') {
            if let Some(slot) = self.scopes.find_local(&identifier.value) {
                return Ok(ResolvedVariable {
                    slot: VariableSlot::Local(slot),
                    variable: self.scopes.local(slot).clone(),
                });
            }
        }

        let current = self.scopes.current_module();
        let (path, _) = split_qualified(&identifier.value);
        if !path.is_empty() && self.symbols.resolve_qualified_module(current, &path).is_none() {
            return Err(Error::new(
                ErrorImpl::ModuleNotFound {
                    module: path.join("."),
                },
                identifier.span.start.clone(),
            ));
        }

        match self.symbols.resolve_variable(current, &identifier.value) {
            Some((module, variable)) => {
                self.check_access(module, "variable", &variable.modifiers, identifier)?;
                Ok(ResolvedVariable {
                    slot: VariableSlot::Global(module),
                    variable: variable.clone(),
                })
            }
            None => Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: identifier.value.clone(),
                },
                identifier.span.start.clone(),
            )),
        }
    }

    /// Validates `identifier OPERATOR value` and marks the variable
    /// initialized. Returns the variable's type.
    pub fn assign(&mut self, identifier: &Token, operator: &Token, value: &TypedExpr) -> Result<Datatype, Error> {
        let resolved = self.find_variable(identifier)?;
        let variable = &resolved.variable;
        let position = identifier.span.start.clone();

        if let VariableSlot::Global(owner) = resolved.slot {
            if variable.is_owned() && owner != self.scopes.current_module() {
                return Err(Error::new(
                    ErrorImpl::AccessViolation {
                        kind: String::from("owned variable"),
                        name: identifier.value.clone(),
                        from: self.symbols.path_of(self.scopes.current_module()),
                    },
                    position,
                ));
            }
        }

        let compound = operator.kind.compound_operator();
        if compound.is_some() && !variable.initialized {
            return Err(Error::new(
                ErrorImpl::VariableNotInitialized {
                    variable: identifier.value.clone(),
                },
                position,
            ));
        }
        if variable.is_constant() && variable.initialized {
            return Err(Error::new(
                ErrorImpl::ConstantReassignment {
                    variable: identifier.value.clone(),
                },
                position,
            ));
        }

        let result = match compound {
            Some(binary) => Datatype::binary_result(binary, variable.datatype, value.datatype).ok_or_else(|| {
                Error::new(
                    ErrorImpl::OperatorTypeError {
                        operator: operator.value.clone(),
                        operands: format!("{} and {}", variable.datatype, value.datatype),
                    },
                    operator.span.start.clone(),
                )
            })?,
            None => value.datatype,
        };
        if !Datatype::valid_varset(result, variable.datatype) {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: variable.datatype.to_string(),
                    received: result.to_string(),
                },
                value.get_span().start.clone(),
            ));
        }

        let datatype = variable.datatype;
        if let VariableSlot::Local(slot) = resolved.slot {
            self.scopes.local_mut(slot).initialized = true;
        }
        Ok(datatype)
    }

    /// Picks the overload a call refers to and returns its return type.
    ///
    /// An exact parameter-type match wins. Otherwise a single overload that
    /// accepts the arguments once nullability is taken into account is used.
    pub fn resolve_call(&self, callee: &Token, arguments: &[TypedExpr]) -> Result<Datatype, Error> {
        let position = callee.span.start.clone();
        let current = self.scopes.current_module();
        let (path, name) = split_qualified(&callee.value);

        let module = if path.is_empty() {
            self.symbols
                .ancestors(current)
                .find(|id| !self.symbols.module(*id).overloads(name).is_empty())
        } else {
            Some(self.symbols.resolve_qualified_module(current, &path).ok_or_else(|| {
                Error::new(
                    ErrorImpl::ModuleNotFound {
                        module: path.join("."),
                    },
                    position.clone(),
                )
            })?)
        };

        let overloads = module
            .map(|id| self.symbols.module(id).overloads(name))
            .unwrap_or_default();
        let module = match module {
            Some(id) if !overloads.is_empty() => id,
            _ => {
                return Err(Error::new(
                    ErrorImpl::FunctionNotFound {
                        function: name.to_string(),
                        module: self.symbols.path_of(module.unwrap_or(current)),
                    },
                    position,
                ))
            }
        };

        let types: Vec<Datatype> = arguments.iter().map(|arg| arg.datatype).collect();
        // Signatures are unique across return types, so at most one matches.
        let definition = overloads
            .into_iter()
            .find(|def| def.accepts_exactly(&types))
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::NoImplementation {
                        function: name.to_string(),
                        arguments: describe_arguments(&types),
                    },
                    position,
                )
            })?;

        self.check_access(module, "function", &definition.modifiers, callee)?;
        Ok(definition.return_type)
    }

    // PASSES

    pub fn defer_global(&mut self, global: DeferredGlobal) {
        self.deferred.push(global);
    }

    /// Retries the `?` globals the skim pass deferred until a round types
    /// none of them. Whatever is left gets reported by the evaluate pass.
    fn resolve_deferred_globals(&mut self) {
        while !self.deferred.is_empty() {
            let pending = std::mem::take(&mut self.deferred);
            let count = pending.len();
            for global in pending {
                if !retry_deferred_global(self, &global) {
                    self.deferred.push(global);
                }
            }
            if self.deferred.len() == count {
                debug!(remaining = count, "inferred globals left untyped");
                self.deferred.clear();
            }
        }
    }

    #[instrument(skip_all, fields(skimming = skimming))]
    fn run_pass(&mut self, tokens: &[Token], skimming: bool) -> Vec<Stmt> {
        self.skimming = skimming;
        self.stdlib = self.config.stdlib;
        self.scopes = ScopeStack::new(self.symbols.root());
        self.frames = vec![Frame::new(None)];

        let mut current: Vec<Token> = vec![];
        for token in tokens {
            if self.diagnostics.has_internal() || self.diagnostics.is_exhausted() {
                break;
            }
            match token.kind {
                TokenKind::EOF => break,
                TokenKind::Semicolon => {
                    current.push(token.clone());
                    let statement = std::mem::take(&mut current);
                    self.statement(&statement);
                }
                TokenKind::OpenCurly => {
                    current.push(token.clone());
                    let statement = std::mem::take(&mut current);
                    self.open_block(&statement);
                }
                TokenKind::CloseCurly => {
                    if !current.is_empty() {
                        self.error(
                            ErrorImpl::ExpectedToken {
                                expected: String::from("`;`"),
                                found: token.value.clone(),
                            },
                            token,
                        );
                        current.clear();
                    }
                    self.close_block(token);
                }
                _ => current.push(token.clone()),
            }
        }

        if let Some(last) = current.last() {
            self.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("`;`"),
                    found: String::from("end of input"),
                },
                last,
            );
        }
        if self.frames.len() > 1 && !self.diagnostics.has_internal() {
            let position = tokens
                .last()
                .map(|token| token.span.start.clone())
                .unwrap_or_else(Position::null);
            self.report(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: String::from("`}`"),
                    found: String::from("end of input"),
                },
                position,
            ));
        }

        self.frames
            .drain(..)
            .next()
            .map(|frame| frame.body)
            .unwrap_or_default()
    }

    fn statement(&mut self, tokens: &[Token]) {
        let depth = self.scopes.len();
        let (_, rest) = split_modifiers(tokens);

        let stmt = match rest.first() {
            Some(first) if block_kind(first.kind).is_some() => {
                let last = &tokens[tokens.len() - 1];
                self.error(
                    ErrorImpl::ExpectedToken {
                        expected: String::from("`{`"),
                        found: last.value.clone(),
                    },
                    last,
                );
                None
            }
            _ => parse_statement(self, tokens),
        };

        self.scopes.truncate(depth);
        if let Some(frame) = self.frames.last_mut() {
            frame.chain = IfChain::Closed;
            if let Some(stmt) = stmt {
                frame.body.push(stmt);
            }
        }
    }

    fn open_block(&mut self, tokens: &[Token]) {
        let depth = self.scopes.len();
        let (modifiers, rest) = split_modifiers(tokens);
        let expected = rest.first().and_then(|token| block_kind(token.kind));
        trace!(tokens = tokens.len(), "block opened");

        let owner = match (expected, rest.first()) {
            (Some(_), Some(first)) if first.kind == TokenKind::Else => self.else_block(modifiers, rest),
            (Some(kind), _) => match parse_statement(self, tokens) {
                Some(stmt) => BlockOwner::Stmt(stmt),
                None => BlockOwner::Failed(kind),
            },
            (None, _) => {
                let brace = &tokens[tokens.len() - 1];
                self.error(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: brace.value.clone(),
                        message: String::from("only modules, functions and control flow statements open a block"),
                    },
                    brace,
                );
                BlockOwner::Failed(ScopeKind::If)
            }
        };

        let kind = expected.unwrap_or(ScopeKind::If);
        if self.scopes.len() == depth || self.scopes.current_kind() != kind {
            self.scopes.push(kind);
        }
        self.frames.push(Frame::new(Some(owner)));
    }

    fn else_block(&mut self, modifiers: &[Token], tokens: &[Token]) -> BlockOwner {
        if self.reject_modifiers(modifiers).is_none() {
            return BlockOwner::Failed(ScopeKind::If);
        }

        let chain = self.frames.last().map(|frame| frame.chain).unwrap_or(IfChain::Closed);
        if chain == IfChain::Closed {
            self.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: tokens[0].value.clone(),
                    message: String::from("`else` must directly follow an `if` block"),
                },
                &tokens[0],
            );
            return BlockOwner::Failed(ScopeKind::If);
        }

        match tokens.get(1).map(|token| token.kind) {
            Some(TokenKind::OpenCurly) if tokens.len() == 2 => BlockOwner::Else,
            Some(TokenKind::If) => match parse_if_stmt(self, &tokens[1..], &[]) {
                Some(Stmt::If(stmt)) => BlockOwner::ElseIf(stmt),
                _ => BlockOwner::Failed(ScopeKind::If),
            },
            _ => {
                self.error(
                    ErrorImpl::UnexpectedToken {
                        token: tokens[1].value.clone(),
                    },
                    &tokens[1],
                );
                BlockOwner::Failed(ScopeKind::If)
            }
        }
    }

    fn close_block(&mut self, token: &Token) {
        if self.frames.len() <= 1 {
            self.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: String::from("there is no open block to close"),
                },
                token,
            );
            return;
        }

        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => return,
        };
        if !self.scopes.pop_block() {
            self.report(Error::new(
                ErrorImpl::Internal {
                    message: String::from("scope stack does not match the open blocks"),
                },
                token.span.start.clone(),
            ));
            return;
        }

        let parent = match self.frames.last_mut() {
            Some(parent) => parent,
            None => return,
        };
        parent.chain = match frame.owner {
            Some(BlockOwner::Stmt(mut stmt)) => {
                let is_if = matches!(stmt, Stmt::If(_));
                set_body(&mut stmt, frame.body);
                parent.body.push(stmt);
                if is_if {
                    IfChain::Open
                } else {
                    IfChain::Closed
                }
            }
            Some(BlockOwner::ElseIf(mut stmt)) => {
                stmt.body = frame.body;
                if parent.attach_else(ElseBranch::ElseIf(Box::new(stmt))) {
                    IfChain::Open
                } else {
                    IfChain::Detached
                }
            }
            Some(BlockOwner::Else) => {
                parent.attach_else(ElseBranch::Block(frame.body));
                IfChain::Closed
            }
            Some(BlockOwner::Failed(ScopeKind::If)) => IfChain::Detached,
            _ => IfChain::Closed,
        };
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.diagnostics.into_errors()
    }
}

/// Runs the skim and evaluate passes over a token stream.
///
/// Returns the AST (absent when the skim pass failed) together with every
/// diagnostic reported.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>, config: &AnalyzerConfig) -> (Option<Vec<Stmt>>, Vec<Error>) {
    let mut parser = Parser::new(config);
    create_token_lookups(&mut parser);

    parser.run_pass(&tokens, true);
    parser.resolve_deferred_globals();
    if parser.diagnostics.has_errors() {
        debug!(errors = parser.diagnostics.len(), "skim pass failed");
        return (None, parser.into_errors());
    }
    debug!(functions = parser.symbols.function_count(), "skim pass finished");

    let ast = parser.run_pass(&tokens, false);
    debug!(
        statements = ast.len(),
        errors = parser.diagnostics.len(),
        "evaluate pass finished"
    );
    (Some(ast), parser.into_errors())
}
