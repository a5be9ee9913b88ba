//! Collections of Fragmentables that mutations are addressed to.
//!
//! A document owns one Fragmentable per text block. Mutations name their
//! target by id; a missing layer or an unknown id is a normal UI state, so
//! lookups return `Option` rather than erroring.

use crate::fragmentable::Fragmentable;

pub trait FragmentLayer {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable>;

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable>;
}

impl FragmentLayer for [Fragmentable] {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        self.iter().find(|f| f.id == id)
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        self.iter_mut().find(|f| f.id == id)
    }
}

impl FragmentLayer for Vec<Fragmentable> {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        self.as_slice().fragmentable(id)
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        self.as_mut_slice().fragmentable_mut(id)
    }
}

/// A single Fragmentable answers only to its own id.
impl FragmentLayer for Fragmentable {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        (self.id == id).then_some(self)
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        (self.id == id).then_some(self)
    }
}

/// No active layer: every lookup misses.
impl<L: FragmentLayer> FragmentLayer for Option<L> {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        self.as_ref().and_then(|l| l.fragmentable(id))
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        self.as_mut().and_then(|l| l.fragmentable_mut(id))
    }
}

impl<L: FragmentLayer + ?Sized> FragmentLayer for &mut L {
    fn fragmentable(&self, id: &str) -> Option<&Fragmentable> {
        (**self).fragmentable(id)
    }

    fn fragmentable_mut(&mut self, id: &str) -> Option<&mut Fragmentable> {
        (**self).fragmentable_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_lookup() {
        let mut layer = vec![Fragmentable::new("a", "one"), Fragmentable::new("b", "two")];
        assert_eq!(layer.fragmentable("b").map(|f| f.root.as_str()), Some("two"));
        assert!(layer.fragmentable_mut("c").is_none());
    }

    #[test]
    fn test_absent_layer() {
        let mut layer: Option<Vec<Fragmentable>> = None;
        assert!(layer.fragmentable_mut("a").is_none());
    }

    #[test]
    fn test_single_fragmentable() {
        let f = Fragmentable::new("a", "text");
        assert!(f.fragmentable("a").is_some());
        assert!(f.fragmentable("b").is_none());
    }
}
