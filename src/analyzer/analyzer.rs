//! Semantic analysis over the AST.
//!
//! A single walk resolves every identifier against the symbol table, infers
//! the type of every expression node and folds the values that are known at
//! analysis time. Both annotations are written into the nodes in place; the
//! shape of the tree is never changed.

use thiserror::Error;

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{Type, Value},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::symbol_table::{Symbol, SymbolTable};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("undeclared variable")]
    UndeclaredVariable,
    #[error("redeclared variable")]
    RedeclaredVariable,
    #[error("modification of an immutable variable")]
    ImmutableModification,
    #[error("operand types do not match the operation")]
    OperationTypeMismatch,
    #[error("condition is not of type Bool")]
    InvalidCondition,
    #[error("unknown type")]
    UnknownType,
    #[error("undeclared function")]
    UndeclaredFunction,
    #[error("arguments do not match the function signature")]
    ArgumentMismatch,
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("factorial of a negative number")]
    InvalidFactorial,
    #[error("literal out of range")]
    LiteralOutOfRange,
}

impl AnalyzerError {
    pub fn get_error_name(&self) -> &'static str {
        match self {
            AnalyzerError::UndeclaredVariable => "UndeclaredVariable",
            AnalyzerError::RedeclaredVariable => "RedeclaredVariable",
            AnalyzerError::ImmutableModification => "ImmutableModification",
            AnalyzerError::OperationTypeMismatch => "OperationTypeMismatch",
            AnalyzerError::InvalidCondition => "InvalidCondition",
            AnalyzerError::UnknownType => "UnknownType",
            AnalyzerError::UndeclaredFunction => "UndeclaredFunction",
            AnalyzerError::ArgumentMismatch => "ArgumentMismatch",
            AnalyzerError::ReturnOutsideFunction => "ReturnOutsideFunction",
            AnalyzerError::DivisionByZero => "DivisionByZero",
            AnalyzerError::ArithmeticOverflow => "ArithmeticOverflow",
            AnalyzerError::InvalidFactorial => "InvalidFactorial",
            AnalyzerError::LiteralOutOfRange => "LiteralOutOfRange",
        }
    }
}

/// Type of an expression plus its folded value, if any.
type Analysis = (Type, Option<Value>);

pub struct Analyzer {
    symbol_table: SymbolTable,
    /// Semantic diagnostics in the order they were found
    errors: Vec<Error>,
    /// The most recent semantic error code
    analyzer_error: Option<AnalyzerError>,
    /// Number of enclosing loop and function bodies
    dynamic_depth: usize,
    /// Return types of the enclosing function definitions, innermost last
    function_returns: Vec<Type>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            symbol_table: SymbolTable::new(),
            errors: vec![],
            analyzer_error: None,
            dynamic_depth: 0,
            function_returns: vec![],
        }
    }

    pub fn get_symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    pub fn get_analyzer_error(&self) -> Option<AnalyzerError> {
        self.analyzer_error
    }

    /// Records `error` as the current semantic error and builds its diagnostic at `token`.
    fn fail(&mut self, error: AnalyzerError, token: &Token) -> Error {
        self.analyzer_error = Some(error);
        Error::new(ErrorImpl::Semantic(error), token.location, token.lexeme.clone())
    }

    fn report(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Reports a failed check and turns it into a statement result.
    fn check<T>(&mut self, result: Result<T, Error>) -> bool {
        match result {
            Ok(_) => true,
            Err(error) => {
                self.report(error);
                false
            }
        }
    }

    /// Combines two independent analyses. When both fail the first error is
    /// reported here and the second is returned to the caller.
    fn both<A, B>(&mut self, first: Result<A, Error>, second: Result<B, Error>) -> Result<(A, B), Error> {
        match (first, second) {
            (Ok(first), Ok(second)) => Ok((first, second)),
            (Err(first), Err(second)) => {
                self.report(first);
                Err(second)
            }
            (Err(error), _) | (_, Err(error)) => Err(error),
        }
    }

    /// Whether a reference to `symbol` may be replaced by its stored value here.
    fn is_foldable(&self, symbol: &Symbol) -> bool {
        symbol.initialized && (!symbol.mutable || (self.dynamic_depth == 0 && !symbol.escaped))
    }

    fn analyze_statement_list(&mut self, statements: &mut [Node]) -> bool {
        let mut success = true;
        for statement in statements.iter_mut() {
            success &= self.analyze_statement(statement);
        }

        success
    }

    fn analyze_block(&mut self, statements: &mut [Node]) -> bool {
        self.symbol_table.enter_namespace();
        let success = self.analyze_statement_list(statements);
        self.symbol_table.exit_namespace();

        success
    }

    pub fn analyze_statement(&mut self, node: &mut Node) -> bool {
        match &mut node.kind {
            NodeKind::Program { statements } => self.analyze_statement_list(statements),
            NodeKind::CodeBlock { statements } => self.analyze_block(statements),
            NodeKind::Declaration {
                keyword,
                identifier,
                type_annotation,
            } => {
                let result = self.declare_variable(keyword, identifier, type_annotation);
                if let Ok(ty) = result {
                    node.inferred_type = Some(ty);
                }
                self.check(result)
            }
            NodeKind::FunctionDefinition {
                name, signature, body, ..
            } => self.analyze_function_definition(name, signature, body),
            NodeKind::ReturnStatement { keyword, value } => {
                let result = self.analyze_return(keyword, value.as_deref_mut());
                self.check(result)
            }
            NodeKind::ConditionalStatement {
                keyword,
                condition,
                then_block,
                else_branch,
            } => self.analyze_conditional(keyword, condition, then_block, else_branch.as_deref_mut()),
            NodeKind::RepeatUntilStatement {
                keyword,
                body,
                condition,
            } => self.analyze_repeat_until(keyword, body, condition),
            NodeKind::ForInStatement {
                keyword,
                variable,
                iterable,
                body,
            } => self.analyze_for_in(keyword, variable, iterable, body),
            // Already reported by the parser
            NodeKind::Error => false,
            _ => {
                let result = self.analyze_expression(node);
                self.check(result)
            }
        }
    }

    /// Annotates `node` with its type and, when known, its value.
    pub fn analyze_expression(&mut self, node: &mut Node) -> Result<Type, Error> {
        let (ty, value) = match &mut node.kind {
            NodeKind::Literal { token } => self.analyze_literal(token)?,
            NodeKind::BooleanLiteral { token } => (Type::Bool, Some(Value::Bool(token.kind == TokenKind::True))),
            NodeKind::Identifier { token } => self.analyze_identifier(token)?,
            NodeKind::Assignment {
                operator,
                target,
                value,
            } => self.analyze_assignment(operator, target, value)?,
            NodeKind::BinaryExpression { operator, left, right } => self.analyze_binary(operator, left, right)?,
            NodeKind::UnaryExpression { operator, operand } => self.analyze_unary(operator, operand)?,
            NodeKind::PostfixExpression { operator, operand } => self.analyze_factorial(operator, operand)?,
            NodeKind::FunctionCall { callee, arguments } => self.analyze_call(callee, arguments)?,
            _ => (Type::Void, None),
        };

        node.inferred_type = Some(ty);
        node.value = value;
        Ok(ty)
    }

    fn analyze_literal(&mut self, token: &Token) -> Result<Analysis, Error> {
        match token.kind {
            TokenKind::String => Ok((Type::String, Some(Value::String(token.lexeme.clone())))),
            _ if token.lexeme.contains('.') => match token.lexeme.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok((Type::Float, Some(Value::Float(value)))),
                _ => Err(self.fail(AnalyzerError::LiteralOutOfRange, token)),
            },
            _ => match token.lexeme.parse::<i64>() {
                Ok(value) => Ok((Type::Int, Some(Value::Int(value)))),
                Err(_) => Err(self.fail(AnalyzerError::LiteralOutOfRange, token)),
            },
        }
    }

    fn analyze_identifier(&mut self, token: &Token) -> Result<Analysis, Error> {
        let Some(symbol) = self.symbol_table.lookup(&token.lexeme) else {
            return Err(self.fail(AnalyzerError::UndeclaredVariable, token));
        };

        if symbol.is_function() {
            return Err(self.fail(AnalyzerError::OperationTypeMismatch, token));
        }

        let value = if self.is_foldable(symbol) {
            symbol.value.clone()
        } else {
            None
        };

        Ok((symbol.ty, value))
    }

    /// Resolves a type annotation node, annotating it with the resolved type.
    fn resolve_type(&mut self, node: &mut Node, allow_void: bool) -> Result<Type, Error> {
        let NodeKind::TypeAnnotation { token } = &node.kind else {
            return Ok(Type::Void);
        };

        match Type::from_name(&token.lexeme) {
            Some(Type::Void) if !allow_void => Err(self.fail(AnalyzerError::UnknownType, token)),
            Some(ty) => {
                node.inferred_type = Some(ty);
                Ok(ty)
            }
            None => Err(self.fail(AnalyzerError::UnknownType, token)),
        }
    }

    fn declare_variable(&mut self, keyword: &Token, identifier: &Token, type_annotation: &mut Node) -> Result<Type, Error> {
        let ty = self.resolve_type(type_annotation, false)?;
        let mutable = keyword.kind == TokenKind::Var;

        self.symbol_table
            .declare(Symbol::variable(&identifier.lexeme, ty, mutable, identifier.location))
            .map_err(|error| self.fail(error, identifier))?;

        Ok(ty)
    }

    /// Checks that an existing symbol may be assigned to and returns its type.
    fn resolve_assignment_target(&mut self, token: &Token) -> Result<Type, Error> {
        let Some(symbol) = self.symbol_table.lookup(&token.lexeme) else {
            return Err(self.fail(AnalyzerError::UndeclaredVariable, token));
        };

        if symbol.is_function() {
            return Err(self.fail(AnalyzerError::OperationTypeMismatch, token));
        }
        if !symbol.mutable && symbol.initialized {
            return Err(self.fail(AnalyzerError::ImmutableModification, token));
        }

        Ok(symbol.ty)
    }

    fn analyze_assignment(&mut self, operator: &Token, target: &mut Node, value: &mut Node) -> Result<Analysis, Error> {
        let value_type = self.analyze_expression(value);

        // A declaring assignment declares its symbol even if the value fails
        let (identifier, target_type) = match &mut target.kind {
            NodeKind::Declaration {
                keyword,
                identifier,
                type_annotation,
            } => {
                let ty = self.declare_variable(keyword, identifier, type_annotation);
                (identifier.clone(), ty)
            }
            NodeKind::Identifier { token } => {
                let ty = self.resolve_assignment_target(token);
                (token.clone(), ty)
            }
            _ => return Err(self.fail(AnalyzerError::UndeclaredVariable, operator)),
        };

        let (value_type, target_type) = self.both(value_type, target_type)?;
        target.inferred_type = Some(target_type);

        if value_type != target_type {
            return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
        }

        let namespace = self.symbol_table.current_namespace();
        let in_function = !self.function_returns.is_empty();
        let in_loop = self.dynamic_depth > 0;

        if let Some(symbol) = self.symbol_table.lookup_mut(&identifier.lexeme) {
            let outer = symbol.namespace < namespace;
            if outer && in_function {
                symbol.escaped = true;
            }

            symbol.initialized = true;
            symbol.value = if outer || symbol.escaped || (in_loop && symbol.mutable) {
                None
            } else {
                value.value.clone()
            };
        }

        Ok((target_type, value.value.clone()))
    }

    fn analyze_binary(&mut self, operator: &Token, left: &mut Node, right: &mut Node) -> Result<Analysis, Error> {
        let left_type = self.analyze_expression(left);
        let right_type = self.analyze_expression(right);
        let (left_type, right_type) = self.both(left_type, right_type)?;

        let ty = match operator.kind {
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                if !left_type.is_numeric() || !right_type.is_numeric() {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }
                left_type.widen(&right_type)
            }
            TokenKind::And | TokenKind::Or => {
                if left_type != Type::Bool || right_type != Type::Bool {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }
                Type::Bool
            }
            TokenKind::Equals | TokenKind::NotEquals => {
                if left_type != right_type {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }
                Type::Bool
            }
            _ => {
                if !left_type.is_numeric() || !right_type.is_numeric() {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }
                Type::Bool
            }
        };

        let value = match (&left.value, &right.value) {
            (Some(left_value), Some(right_value)) => Some(self.fold_binary(operator, ty, left_value, right_value)?),
            _ => None,
        };

        Ok((ty, value))
    }

    fn fold_binary(&mut self, operator: &Token, ty: Type, left: &Value, right: &Value) -> Result<Value, Error> {
        match operator.kind {
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                if ty == Type::Int {
                    self.fold_int_arithmetic(operator, left, right)
                } else {
                    self.fold_float_arithmetic(operator, left, right)
                }
            }
            TokenKind::And => Ok(Value::Bool(left.as_bool() == Some(true) && right.as_bool() == Some(true))),
            TokenKind::Or => Ok(Value::Bool(left.as_bool() == Some(true) || right.as_bool() == Some(true))),
            TokenKind::Equals => Ok(Value::Bool(left == right)),
            TokenKind::NotEquals => Ok(Value::Bool(left != right)),
            _ => {
                let (left, right) = (left.as_float().unwrap_or_default(), right.as_float().unwrap_or_default());
                let result = match operator.kind {
                    TokenKind::Less => left < right,
                    TokenKind::LessEquals => left <= right,
                    TokenKind::Greater => left > right,
                    _ => left >= right,
                };
                Ok(Value::Bool(result))
            }
        }
    }

    fn fold_int_arithmetic(&mut self, operator: &Token, left: &Value, right: &Value) -> Result<Value, Error> {
        let (left, right) = (left.as_int().unwrap_or_default(), right.as_int().unwrap_or_default());

        if matches!(operator.kind, TokenKind::Slash | TokenKind::Percent) && right == 0 {
            return Err(self.fail(AnalyzerError::DivisionByZero, operator));
        }

        let result = match operator.kind {
            TokenKind::Plus => left.checked_add(right),
            TokenKind::Dash => left.checked_sub(right),
            TokenKind::Star => left.checked_mul(right),
            TokenKind::Slash => left.checked_div(right),
            _ => left.checked_rem(right),
        };

        result
            .map(Value::Int)
            .ok_or_else(|| self.fail(AnalyzerError::ArithmeticOverflow, operator))
    }

    fn fold_float_arithmetic(&mut self, operator: &Token, left: &Value, right: &Value) -> Result<Value, Error> {
        let (left, right) = (left.as_float().unwrap_or_default(), right.as_float().unwrap_or_default());

        if matches!(operator.kind, TokenKind::Slash | TokenKind::Percent) && right == 0.0 {
            return Err(self.fail(AnalyzerError::DivisionByZero, operator));
        }

        let result = match operator.kind {
            TokenKind::Plus => left + right,
            TokenKind::Dash => left - right,
            TokenKind::Star => left * right,
            TokenKind::Slash => left / right,
            _ => left % right,
        };

        if !result.is_finite() {
            return Err(self.fail(AnalyzerError::ArithmeticOverflow, operator));
        }

        Ok(Value::Float(result))
    }

    fn analyze_unary(&mut self, operator: &Token, operand: &mut Node) -> Result<Analysis, Error> {
        let ty = self.analyze_expression(operand)?;

        match operator.kind {
            TokenKind::Dash => {
                if !ty.is_numeric() {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }

                let value = match &operand.value {
                    Some(Value::Int(value)) => Some(Value::Int(
                        value
                            .checked_neg()
                            .ok_or_else(|| self.fail(AnalyzerError::ArithmeticOverflow, operator))?,
                    )),
                    Some(Value::Float(value)) => Some(Value::Float(-value)),
                    _ => None,
                };

                Ok((ty, value))
            }
            _ => {
                if ty != Type::Bool {
                    return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
                }

                Ok((Type::Bool, operand.value.as_ref().and_then(Value::as_bool).map(|value| Value::Bool(!value))))
            }
        }
    }

    /// `n!` for `Int` operands; folds to the product of `1..=n`.
    fn analyze_factorial(&mut self, operator: &Token, operand: &mut Node) -> Result<Analysis, Error> {
        let ty = self.analyze_expression(operand)?;
        if ty != Type::Int {
            return Err(self.fail(AnalyzerError::OperationTypeMismatch, operator));
        }

        let Some(n) = operand.value.as_ref().and_then(Value::as_int) else {
            return Ok((Type::Int, None));
        };
        if n < 0 {
            return Err(self.fail(AnalyzerError::InvalidFactorial, operator));
        }

        let product = (1..=n).try_fold(1i64, |product, factor| product.checked_mul(factor));
        match product {
            Some(product) => Ok((Type::Int, Some(Value::Int(product)))),
            None => Err(self.fail(AnalyzerError::ArithmeticOverflow, operator)),
        }
    }

    /// Calls must name a declared function and pass its labels in order with matching types.
    fn analyze_call(&mut self, callee: &Token, arguments: &mut Node) -> Result<Analysis, Error> {
        let signature = self
            .symbol_table
            .lookup(&callee.lexeme)
            .and_then(|symbol| symbol.parameters.clone().map(|parameters| (symbol.ty, parameters)));

        let NodeKind::ArgumentList { arguments } = &mut arguments.kind else {
            return Err(self.fail(AnalyzerError::ArgumentMismatch, callee));
        };

        // Argument values are checked even when the callee is unknown
        let mut failure = None;
        for argument in arguments.iter_mut() {
            let NodeKind::Argument { value, .. } = &mut argument.kind else {
                continue;
            };

            match self.analyze_expression(value) {
                Ok(ty) => argument.inferred_type = Some(ty),
                Err(error) => {
                    if let Some(previous) = failure.replace(error) {
                        self.report(previous);
                    }
                }
            }
        }

        let Some((return_type, parameters)) = signature else {
            if let Some(error) = failure {
                self.report(error);
            }
            return Err(self.fail(AnalyzerError::UndeclaredFunction, callee));
        };
        if let Some(error) = failure {
            return Err(error);
        }

        if arguments.len() != parameters.len() {
            return Err(self.fail(AnalyzerError::ArgumentMismatch, callee));
        }

        for (argument, (label, ty)) in arguments.iter().zip(parameters.iter()) {
            let NodeKind::Argument { label: argument_label, .. } = &argument.kind else {
                continue;
            };

            if argument_label.lexeme != *label || argument.inferred_type != Some(*ty) {
                return Err(self.fail(AnalyzerError::ArgumentMismatch, argument_label));
            }
        }

        Ok((return_type, None))
    }

    fn analyze_function_definition(&mut self, name: &Token, signature: &mut Node, body: &mut Node) -> bool {
        let NodeKind::FunctionSignature {
            parameters,
            return_type,
        } = &mut signature.kind
        else {
            return false;
        };

        let return_type = self.resolve_type(return_type, true);
        let parameters = self.resolve_parameters(parameters);
        let (return_type, parameters) = match self.both(return_type, parameters) {
            Ok(signature) => signature,
            Err(error) => {
                self.report(error);
                return false;
            }
        };
        signature.inferred_type = Some(return_type);

        // Declared before the body so the function can call itself
        let labels = parameters
            .iter()
            .map(|(label, ty)| (label.lexeme.clone(), *ty))
            .collect();
        let declared = self
            .symbol_table
            .declare(Symbol::function(&name.lexeme, return_type, labels, name.location))
            .map_err(|error| self.fail(error, name));
        let mut success = self.check(declared);

        self.symbol_table.enter_namespace();
        for (label, ty) in &parameters {
            let mut symbol = Symbol::variable(&label.lexeme, *ty, false, label.location);
            symbol.initialized = true;

            let declared = self.symbol_table.declare(symbol).map_err(|error| self.fail(error, label));
            success &= self.check(declared);
        }

        self.function_returns.push(return_type);
        self.dynamic_depth += 1;
        success &= self.analyze_statement_list(body.statements_mut());
        self.dynamic_depth -= 1;
        self.function_returns.pop();

        self.symbol_table.exit_namespace();

        success
    }

    fn resolve_parameters(&mut self, parameters: &mut Node) -> Result<Vec<(Token, Type)>, Error> {
        let NodeKind::ParameterList { parameters } = &mut parameters.kind else {
            return Ok(vec![]);
        };

        let mut resolved = vec![];
        for parameter in parameters.iter_mut() {
            let NodeKind::Parameter {
                label,
                type_annotation,
            } = &mut parameter.kind
            else {
                continue;
            };

            let ty = self.resolve_type(type_annotation, false)?;
            parameter.inferred_type = Some(ty);
            resolved.push((label.clone(), ty));
        }

        Ok(resolved)
    }

    fn analyze_return(&mut self, keyword: &Token, value: Option<&mut Node>) -> Result<(), Error> {
        let Some(expected) = self.function_returns.last().copied() else {
            return Err(self.fail(AnalyzerError::ReturnOutsideFunction, keyword));
        };

        let ty = match value {
            Some(value) => self.analyze_expression(value)?,
            None => Type::Void,
        };

        if ty != expected {
            return Err(self.fail(AnalyzerError::OperationTypeMismatch, keyword));
        }

        Ok(())
    }

    /// Analyzes a condition, returning its folded value if it has one.
    fn analyze_condition(&mut self, keyword: &Token, condition: &mut Node) -> Result<Option<bool>, Error> {
        let ty = self.analyze_expression(condition)?;

        if ty != Type::Bool {
            let anchor = condition.get_token().unwrap_or(keyword);
            return Err(self.fail(AnalyzerError::InvalidCondition, anchor));
        }

        Ok(condition.value.as_ref().and_then(Value::as_bool))
    }

    /// Branches a folded condition can never take are not analyzed.
    fn analyze_conditional(
        &mut self,
        keyword: &Token,
        condition: &mut Node,
        then_block: &mut Node,
        else_branch: Option<&mut Node>,
    ) -> bool {
        let mut success = true;

        let folded = match self.analyze_condition(keyword, condition) {
            Ok(folded) => folded,
            Err(error) => {
                self.report(error);
                success = false;
                None
            }
        };

        if folded != Some(false) {
            success &= self.analyze_statement(then_block);
        }
        if let Some(else_branch) = else_branch {
            if folded != Some(true) {
                success &= self.analyze_statement(else_branch);
            }
        }

        success
    }

    fn analyze_repeat_until(&mut self, keyword: &Token, body: &mut Node, condition: &mut Node) -> bool {
        self.dynamic_depth += 1;

        let mut success = self.analyze_statement(body);
        let result = self.analyze_condition(keyword, condition);
        success &= self.check(result);

        self.dynamic_depth -= 1;

        success
    }

    /// `for x in n` counts over an `Int`, `for c in s` walks a `String`.
    fn analyze_for_in(&mut self, keyword: &Token, variable: &Token, iterable: &mut Node, body: &mut Node) -> bool {
        let ty = match self.analyze_expression(iterable) {
            Ok(ty @ (Type::Int | Type::String)) => ty,
            Ok(_) => {
                let anchor = iterable.get_token().unwrap_or(keyword);
                let error = self.fail(AnalyzerError::OperationTypeMismatch, anchor);
                self.report(error);
                return false;
            }
            Err(error) => {
                self.report(error);
                return false;
            }
        };

        self.symbol_table.enter_namespace();

        let mut symbol = Symbol::variable(&variable.lexeme, ty, false, variable.location);
        symbol.initialized = true;
        let declared = self.symbol_table.declare(symbol).map_err(|error| self.fail(error, variable));
        let mut success = self.check(declared);

        self.dynamic_depth += 1;
        success &= self.analyze_statement_list(body.statements_mut());
        self.dynamic_depth -= 1;

        self.symbol_table.exit_namespace();

        success
    }
}

/// Runs semantic analysis over a parsed program.
///
/// Every statement is analyzed even after a failure, so all semantic errors
/// of the program are collected in the returned analyzer.
///
/// # Returns
///
/// A tuple containing:
/// - The Analyzer, holding the global symbol table and the diagnostics
/// - Whether the whole program passed analysis
pub fn analyze(ast: &mut Node) -> (Analyzer, bool) {
    let mut analyzer = Analyzer::new();
    let success = analyzer.analyze_statement(ast);

    (analyzer, success)
}
