use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::Error;
use crate::inst::Instruction;
use crate::token::Token;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BracketKind {
    #[default]
    None,
    Round,
    Curly,
    Square,
}

impl BracketKind {
    pub fn delimiters(self) -> Option<(char, char)> {
        match self {
            BracketKind::None => None,
            BracketKind::Round => Some(('(', ')')),
            BracketKind::Curly => Some(('{', '}')),
            BracketKind::Square => Some(('[', ']')),
        }
    }
}

// ----------------------------------------------------------------------------
// Node

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {
    Item(T),
    Scope(Scope<T>),
}

impl<T> Node<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Node::Item(item) => Some(item),
            Node::Scope(_) => None,
        }
    }

    pub fn scope(&self) -> Option<&Scope<T>> {
        match self {
            Node::Item(_) => None,
            Node::Scope(scope) => Some(scope),
        }
    }
}

impl<T> From<T> for Node<T> {
    fn from(item: T) -> Self {
        Node::Item(item)
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Item(item) => write!(f, "{}", item),
            Node::Scope(scope) => write!(f, "{}", scope),
        }
    }
}

// ----------------------------------------------------------------------------
// Scope

/// Ordered sequence of nodes wrapped by an optional bracket pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope<T> {
    body: Vec<Node<T>>,
    bracket: BracketKind,
}

pub type TokenScope = Scope<Token>;
pub type InstructionScope = Scope<Instruction>;

impl<T> Scope<T> {
    pub fn new(body: Vec<Node<T>>, bracket: BracketKind) -> Self {
        Scope { body, bracket }
    }

    pub fn empty(bracket: BracketKind) -> Self {
        Scope::new(vec![], bracket)
    }

    pub fn bracket(&self) -> BracketKind {
        self.bracket
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn push(&mut self, node: impl Into<Node<T>>) {
        self.body.push(node.into());
    }

    pub fn iter(&self) -> slice::Iter<'_, Node<T>> {
        self.body.iter()
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.body.len(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&Node<T>, Error> {
        self.body.get(index).ok_or(self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Node<T>, Error> {
        let err = self.out_of_range(index);
        self.body.get_mut(index).ok_or(err)
    }

    /// Replaces the child at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, node: impl Into<Node<T>>) -> Result<Node<T>, Error> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, node.into()))
    }

    /// Depth-first iterator over every item in the tree.
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves {
            stack: vec![self.body.iter()],
        }
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Scope::empty(BracketKind::None)
    }
}

impl<T> FromIterator<T> for Scope<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Scope::new(iter.into_iter().map(Node::Item).collect(), BracketKind::None)
    }
}

impl<'a, T> IntoIterator for &'a Scope<T> {
    type Item = &'a Node<T>;
    type IntoIter = slice::Iter<'a, Node<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Scope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delims = self.bracket.delimiters();
        if let Some((open, _)) = delims {
            write!(f, "{}", open)?;
        }
        for (idx, node) in self.body.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        if let Some((_, close)) = delims {
            write!(f, "{}", close)?;
        }
        Ok(())
    }
}

pub struct Leaves<'a, T> {
    stack: Vec<slice::Iter<'a, Node<T>>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Item(item)) => return Some(item),
                Some(Node::Scope(scope)) => self.stack.push(scope.body.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Instruction scope

impl Scope<Instruction> {
    /// Patches the operand of every direct child equal to `old`.
    /// Nested scopes are left untouched.
    pub fn replace(&mut self, old: u16, new: u16) -> &mut Self {
        for node in self.body.iter_mut() {
            if let Node::Item(inst) = node {
                if inst.value == old {
                    inst.value = new;
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::Mode;
    use strum::IntoEnumIterator;

    fn tokens(bracket: BracketKind, words: &[&str]) -> TokenScope {
        let body = words.iter().map(|w| Node::Item(Token::new(*w, 0))).collect();
        Scope::new(body, bracket)
    }

    fn nested() -> TokenScope {
        let inner = tokens(BracketKind::Square, &["b", "c"]);
        let mut outer = tokens(BracketKind::Round, &["a"]);
        outer.push(Node::Scope(inner));
        outer.push(Token::label("d", 1));
        outer
    }

    #[test]
    fn test_len_and_iter() {
        let scope = nested();
        assert_eq!(scope.len(), 3);
        let rendered: Vec<String> = scope.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["a", "[b c]", "d"]);
        // restartable
        assert_eq!(scope.iter().count(), scope.iter().count());
    }

    #[test]
    fn test_get_set() {
        let mut scope = nested();
        let prev = scope.set(0, Token::new("z", 2)).unwrap();
        assert_eq!(prev, Node::Item(Token::new("a", 0)));
        assert_eq!(scope.get(0).unwrap(), &Node::Item(Token::new("z", 2)));
    }

    #[test]
    fn test_out_of_range() {
        let mut scope = nested();
        assert_eq!(
            scope.get(3).unwrap_err(),
            Error::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            scope.set(10, Token::new("x", 0)).unwrap_err(),
            Error::IndexOutOfRange { index: 10, len: 3 }
        );
        assert!(TokenScope::empty(BracketKind::None).get(0).is_err());
        // failed set leaves the scope untouched
        assert_eq!(scope, nested());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = nested();
        let mut copy = original.clone();
        match copy.get_mut(1).unwrap() {
            Node::Scope(inner) => {
                inner.set(0, Token::new("changed", 0)).unwrap();
            }
            Node::Item(_) => panic!("expected nested scope"),
        }
        assert_eq!(original.to_string(), "(a [b c] d)");
        assert_eq!(copy.to_string(), "(a [changed c] d)");
        assert_eq!(copy.bracket(), original.bracket());
    }

    #[test]
    fn test_display_brackets() {
        let expects = ["x y", "(x y)", "{x y}", "[x y]"];
        for (bracket, expect) in BracketKind::iter().zip(expects) {
            assert_eq!(tokens(bracket, &["x", "y"]).to_string(), expect);
        }
        assert_eq!(tokens(BracketKind::Curly, &[]).to_string(), "{}");
    }

    #[test]
    fn test_bracket_names() {
        assert_eq!("square".parse::<BracketKind>(), Ok(BracketKind::Square));
        assert_eq!(BracketKind::Curly.to_string(), "curly");
    }

    #[test]
    fn test_leaves() {
        let mut inner = InstructionScope::empty(BracketKind::Curly);
        inner.push(Instruction::bare("b", 2));
        inner.push(Node::Scope(InstructionScope::from_iter([Instruction::bare("c", 3)])));
        let mut outer = InstructionScope::from_iter([Instruction::bare("a", 1)]);
        outer.push(Node::Scope(inner));
        outer.push(Instruction::bare("d", 4));

        let names: Vec<&str> = outer.leaves().map(|i| i.opcode.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(InstructionScope::default().leaves().count(), 0);
    }

    #[test]
    fn test_replace() {
        let mut scope = InstructionScope::from_iter([
            Instruction::immediate("lra", 7, 0),
            Instruction::pointer("jmp", 7, 1),
            Instruction::immediate("lra", 8, 2),
        ]);
        scope.push(Node::Scope(InstructionScope::from_iter([Instruction::immediate(
            "jmp", 7, 3,
        )])));

        scope.replace(7, 42);

        let values: Vec<u16> = scope.leaves().map(|i| i.value).collect();
        assert_eq!(values, vec![42, 42, 8, 7]);
        // mode is untouched
        assert_eq!(scope.get(1).unwrap().item().unwrap().mode, Mode::Pointer);
    }

    #[test]
    fn test_replace_absent_is_noop() {
        let mut scope = InstructionScope::from_iter([
            Instruction::immediate("lra", 1, 0),
            Instruction::immediate("lra", 2, 1),
        ]);
        let before = scope.clone();
        scope.replace(99, 5).replace(98, 6);
        assert_eq!(scope, before);
    }
}
