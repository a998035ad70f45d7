//! Collection of the function indices that appear as declared references in
//! element segments. `RefFunc` is only legal for functions in that set, so
//! the driver scans all segments up front and carries the result in the
//! context.

use crate::source::Spanned;
use crate::syntax::instructions::{Expr, Instr};
use crate::syntax::modules::{Elem, SegmentMode};
use hashbrown::HashSet;

/// Free function references of a syntax fragment.
#[derive(Clone, Debug, Default)]
pub struct Refs {
	pub funcs: HashSet<u32>,
}

impl Refs {
	fn union(mut self, other: Refs) -> Refs {
		self.funcs.extend(other.funcs);
		self
	}
}

/// Union of `project` over every element of `xs`.
pub fn list<T>(project: impl Fn(&T) -> Refs, xs: &[T]) -> Refs {
	xs.iter().fold(Refs::default(), |acc, x| acc.union(project(x)))
}

fn instr(e: &Spanned<Instr>) -> Refs {
	match &e.it {
		Instr::RefFunc(x) => {
			let mut refs = Refs::default();
			refs.funcs.insert(x.it);
			refs
		},
		Instr::Block(_, es) | Instr::Loop(_, es) | Instr::Let(_, _, es) => block(es),
		Instr::If(_, es1, es2) => block(es1).union(block(es2)),
		_ => Refs::default(),
	}
}

fn block(es: &[Spanned<Instr>]) -> Refs {
	list(instr, es)
}

fn expr(e: &Expr) -> Refs {
	block(&e.it)
}

/// Function references declared by an element segment, whatever its mode.
pub fn elem(seg: &Spanned<Elem>) -> Refs {
	let refs = list(expr, &seg.it.init);
	match &seg.it.mode.it {
		SegmentMode::Active { offset, .. } => refs.union(expr(offset)),
		SegmentMode::Passive | SegmentMode::Declarative => refs,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::Span;
	use crate::syntax::types::RefType;
	use alloc::vec::Vec;

	fn sp<T>(it: T) -> Spanned<T> {
		Spanned::new(it, Span::default())
	}

	fn ref_func(x: u32) -> Spanned<Instr> {
		sp(Instr::RefFunc(sp(x)))
	}

	fn segment(init: Vec<Expr>, mode: SegmentMode) -> Spanned<Elem> {
		sp(Elem { typ: RefType::FuncRef, init, mode: sp(mode) })
	}

	#[test]
	fn collects_refs_from_all_segment_modes() {
		let segs = vec![
			segment(vec![sp(vec![ref_func(0)])], SegmentMode::Passive),
			segment(vec![sp(vec![ref_func(1)])], SegmentMode::Declarative),
			segment(
				vec![sp(vec![ref_func(2)])],
				SegmentMode::Active { index: sp(0), offset: sp(vec![ref_func(3)]) },
			),
		];
		let refs = list(elem, &segs);
		assert_eq!(refs.funcs.len(), 4);
		for x in 0..4 {
			assert!(refs.funcs.contains(&x));
		}
	}

	#[test]
	fn collects_refs_inside_nested_blocks() {
		let inner = sp(Instr::Block(vec![], vec![ref_func(5)]));
		let seg = segment(vec![sp(vec![inner])], SegmentMode::Passive);
		let refs = elem(&seg);
		assert!(refs.funcs.contains(&5));
	}

	#[test]
	fn ignores_unrelated_instructions() {
		let seg = segment(vec![sp(vec![sp(Instr::RefNull)])], SegmentMode::Passive);
		assert!(elem(&seg).funcs.is_empty());
	}
}
