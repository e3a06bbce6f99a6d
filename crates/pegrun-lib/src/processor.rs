//! Match-tree processing: dense callback dispatch by symbol id.
//!
//! A processor maps symbol ids to callbacks. Element matches with a
//! registered callback are handed to it; everything else descends into its
//! children, unless a fallback is installed, in which case the fallback
//! sees every undispatched node.

use crate::grammar::{Grammar, SymbolId};
use crate::matches::{Match, Origin};

/// Callback invoked for a dispatched match.
pub type ProcessorCallback<'g> = Box<dyn FnMut(&Grammar, &Match) + 'g>;

pub struct Processor<'g> {
    grammar: &'g Grammar,
    callbacks: Vec<Option<ProcessorCallback<'g>>>,
    fallback: Option<ProcessorCallback<'g>>,
}

impl<'g> Processor<'g> {
    /// A processor for a prepared grammar; the callback table is sized to
    /// the grammar's symbol table.
    pub fn new(grammar: &'g Grammar) -> Processor<'g> {
        let mut callbacks = Vec::new();
        callbacks.resize_with(grammar.symbols_count(), || None);
        Processor {
            grammar,
            callbacks,
            fallback: None,
        }
    }

    /// Register a callback for one symbol id.
    pub fn register<F>(&mut self, symbol: SymbolId, callback: F)
    where
        F: FnMut(&Grammar, &Match) + 'g,
    {
        let index = symbol as usize;
        if index >= self.callbacks.len() {
            self.callbacks.resize_with(index + 1, || None);
        }
        self.callbacks[index] = Some(Box::new(callback));
    }

    /// Install a fallback for nodes with no registered callback.
    pub fn set_fallback<F>(&mut self, callback: F)
    where
        F: FnMut(&Grammar, &Match) + 'g,
    {
        self.fallback = Some(Box::new(callback));
    }

    /// Dispatch a match tree.
    pub fn process(&mut self, matched: &Match) {
        let registered = match matched.origin() {
            Origin::Element(element) => self
                .grammar
                .element(element)
                .id()
                .map(|id| id as usize)
                .filter(|&id| id < self.callbacks.len() && self.callbacks[id].is_some()),
            Origin::Reference(_) => None,
        };
        if let Some(index) = registered {
            let grammar = self.grammar;
            if let Some(callback) = self.callbacks[index].as_mut() {
                callback(grammar, matched);
            }
            return;
        }
        if let Some(fallback) = self.fallback.as_mut() {
            fallback(self.grammar, matched);
            return;
        }
        for child in matched.iter_children() {
            self.process(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Processor;
    use crate::grammar::{Grammar, RefSpec};

    fn number_list() -> Grammar {
        let mut g = Grammar::new();
        let ws = g.token(r"\s+").unwrap();
        let number = g.token(r"\d+").unwrap();
        g.set_name(number, "NUMBER");
        let axiom = g.rule([RefSpec::to(number).many()]);
        g.set_axiom(axiom);
        g.set_skip(ws);
        g.prepare().unwrap();
        g
    }

    #[test]
    fn registered_callbacks_see_matching_elements() {
        let g = number_list();
        let result = g.parse_string("1 22 333").unwrap();
        let root = result.matched().unwrap();
        let number_symbol = find_number_symbol(&g);

        let mut collected = Vec::new();
        {
            let mut processor = Processor::new(&g);
            processor.register(number_symbol, |_, matched| {
                collected.push(matched.token_group(0).unwrap().to_string());
            });
            processor.process(root);
        }
        assert_eq!(collected, ["1", "22", "333"]);
    }

    fn find_number_symbol(g: &Grammar) -> crate::grammar::SymbolId {
        (0..g.symbols_count() as u32)
            .find(|&id| match g.symbol(id) {
                Some(crate::grammar::Symbol::Element(element)) => {
                    g.element(element).name() == Some("NUMBER")
                }
                _ => false,
            })
            .unwrap()
    }

    #[test]
    fn fallback_receives_undispatched_nodes() {
        let g = number_list();
        let result = g.parse_string("1").unwrap();
        let root = result.matched().unwrap();

        let mut seen = 0;
        {
            let mut processor = Processor::new(&g);
            processor.set_fallback(|_, _| seen += 1);
            processor.process(root);
        }
        // the fallback takes the root and does not descend
        assert_eq!(seen, 1);
    }

    #[test]
    fn without_callbacks_processing_descends() {
        let g = number_list();
        let result = g.parse_string("1 2").unwrap();
        let root = result.matched().unwrap();

        let mut processor = Processor::new(&g);
        processor.process(root);
    }
}
