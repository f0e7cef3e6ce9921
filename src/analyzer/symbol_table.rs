use std::{collections::HashMap, fmt::Display};

use crate::{
    ast::types::{Type, Value},
    Location,
};

use super::analyzer::AnalyzerError;

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub identifier: String,
    /// Declared type; the return type for functions
    pub ty: Type,
    pub namespace: usize,
    pub initialized: bool,
    pub mutable: bool,
    pub location: Location,
    /// Last folded value, if it is known at this point of the analysis
    pub value: Option<Value>,
    /// Assigned from inside a function body, so its value is never folded again
    pub escaped: bool,
    /// Labels and types of the parameters, `Some` only for functions
    pub parameters: Option<Vec<(String, Type)>>,
    sequence: usize,
}

impl Symbol {
    pub fn variable(identifier: &str, ty: Type, mutable: bool, location: Location) -> Self {
        Symbol {
            identifier: identifier.to_string(),
            ty,
            namespace: 0,
            initialized: false,
            mutable,
            location,
            value: None,
            escaped: false,
            parameters: None,
            sequence: 0,
        }
    }

    pub fn function(identifier: &str, return_type: Type, parameters: Vec<(String, Type)>, location: Location) -> Self {
        Symbol {
            initialized: true,
            parameters: Some(parameters),
            ..Symbol::variable(identifier, return_type, false, location)
        }
    }

    pub fn is_function(&self) -> bool {
        self.parameters.is_some()
    }

    fn type_description(&self) -> String {
        match &self.parameters {
            Some(parameters) => {
                let parameters = parameters
                    .iter()
                    .map(|(label, ty)| format!("{}: {}", label, ty))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({}) -> {}", parameters, self.ty)
            }
            None => self.ty.to_string(),
        }
    }
}

/// The symbols declared in one namespace.
#[derive(Debug, Default)]
pub struct Scope {
    pub symbols: HashMap<String, Symbol>,
}

/// Stack of scopes; index 0 is the global namespace.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    sequence: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::default()],
            sequence: 0,
        }
    }

    pub fn current_namespace(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn enter_namespace(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Drops every symbol of the current namespace. Leaving the global
    /// namespace empties it.
    pub fn exit_namespace(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        } else {
            self.scopes[0].symbols.clear();
        }
    }

    /// Inserts `symbol` into the current namespace. Shadowing a symbol of an
    /// enclosing namespace is allowed, redeclaring one in the same namespace is not.
    pub fn declare(&mut self, mut symbol: Symbol) -> Result<(), AnalyzerError> {
        let namespace = self.current_namespace();
        let scope = &mut self.scopes[namespace];

        if scope.symbols.contains_key(&symbol.identifier) {
            return Err(AnalyzerError::RedeclaredVariable);
        }

        self.sequence += 1;
        symbol.namespace = namespace;
        symbol.sequence = self.sequence;
        scope.symbols.insert(symbol.identifier.clone(), symbol);

        Ok(())
    }

    /// Resolves `identifier` in the nearest enclosing namespace.
    pub fn lookup(&self, identifier: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.symbols.get(identifier))
    }

    pub fn lookup_mut(&mut self, identifier: &str) -> Option<&mut Symbol> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.symbols.get_mut(identifier))
    }

    pub fn lookup_current(&self, identifier: &str) -> Option<&Symbol> {
        self.scopes.last().and_then(|scope| scope.symbols.get(identifier))
    }

    /// Every live symbol, most recently declared first.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.scopes.iter().flat_map(|scope| scope.symbols.values()).collect();
        symbols.sort_by(|a, b| b.sequence.cmp(&a.sequence));

        symbols
    }

    pub fn len(&self) -> usize {
        self.scopes.iter().map(|scope| scope.symbols.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<20} {:<20} {:<10} {:<12} {:<8} {}",
            "Identifier", "Type", "Namespace", "Initialized", "Mutable", "Location"
        )?;
        writeln!(f, "{}", "-".repeat(82))?;

        for symbol in self.symbols() {
            writeln!(
                f,
                "{:<20} {:<20} {:<10} {:<12} {:<8} {}",
                symbol.identifier,
                symbol.type_description(),
                symbol.namespace,
                yes_no(symbol.initialized),
                yes_no(symbol.mutable),
                symbol.location
            )?;
        }

        Ok(())
    }
}
