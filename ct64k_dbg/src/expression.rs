use anyhow::anyhow;
use ct64k_lib::{Console, Word};

use crate::{AppResult, Session, SymbolTable};

/*
 * Expression
 * `[*]<hex literal>` where `$name` may stand for any symbol address. The
 * leading star reads the memory once at the given address.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression(String);

/// An expression with its symbols substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub value: Word,
    pub deref: bool,
}

impl Expression {
    pub fn new(text: &str) -> Self {
        Self(text.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn evaluate(&self, symbols: &SymbolTable) -> AppResult<Address> {
        let mut text = self.0.trim().to_lowercase();
        for (name, addr) in symbols.substitution_order() {
            text = text.replace(&format!("${}", name), &format!("{:#x}", addr));
        }
        let (text, deref) = match text.strip_prefix('*') {
            Some(rest) => (rest, true),
            None => (text.as_str(), false),
        };
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let value = Word::from_str_radix(digits, 16)
            .map_err(|e| anyhow!("Invalid expression '{}': {}", self.0, e))?;

        Ok(Address { value, deref })
    }

    pub fn resolve<C: Console>(
        &self,
        symbols: &SymbolTable,
        session: &mut Session<C>,
    ) -> AppResult<Word> {
        let address = self.evaluate(symbols)?;
        if address.deref {
            session.read(address.value)
        } else {
            Ok(address.value)
        }
    }
}
