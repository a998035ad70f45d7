//! Subtype matching between value, reference, function, and stack types.
//! All functions take the module's type section so `DefRef` indices can be
//! resolved; matching is reflexive and directed (first argument below).

use crate::syntax::types::{DefType, FuncType, Nullability, NumType, RefType, ValType};

pub fn match_num_type(t1: NumType, t2: NumType) -> bool {
	t1 == t2
}

pub fn match_ref_type(types: &[DefType], t1: RefType, t2: RefType) -> bool {
	use Nullability::*;
	use RefType::*;
	match (t1, t2) {
		(_, AnyRef) => true,
		(NullRef, NullRef) => true,
		(NullRef, FuncRef) => true,
		(NullRef, DefRef(Nullable, _)) => true,
		(FuncRef, FuncRef) => true,
		(DefRef(_, x), FuncRef) => matches!(types.get(x as usize), Some(DefType::Func(_))),
		(DefRef(nul1, x1), DefRef(nul2, x2)) => x1 == x2 && (nul1 == nul2 || nul2 == Nullable),
		_ => false,
	}
}

pub fn match_value_type(types: &[DefType], t1: ValType, t2: ValType) -> bool {
	match (t1, t2) {
		(ValType::Num(t1), ValType::Num(t2)) => match_num_type(t1, t2),
		(ValType::Ref(t1), ValType::Ref(t2)) => match_ref_type(types, t1, t2),
		(ValType::Bot, _) => true,
		_ => false,
	}
}

pub fn match_stack_type(types: &[DefType], ts1: &[ValType], ts2: &[ValType]) -> bool {
	ts1.len() == ts2.len() && ts1.iter().zip(ts2).all(|(t1, t2)| match_value_type(types, *t1, *t2))
}

pub fn match_func_type(_types: &[DefType], ft1: &FuncType, ft2: &FuncType) -> bool {
	// TODO: semantic function-type matching once type canonicalization lands.
	ft1 == ft2
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec::Vec;

	const I32: ValType = ValType::Num(NumType::I32);

	fn types() -> Vec<DefType> {
		vec![
			DefType::Func(FuncType { params: vec![I32], results: vec![I32] }),
			DefType::Func(FuncType { params: vec![], results: vec![] }),
		]
	}

	#[test]
	fn ref_types_match_reflexively() {
		let types = types();
		for t in &[
			RefType::AnyRef,
			RefType::NullRef,
			RefType::FuncRef,
			RefType::DefRef(Nullability::Nullable, 0),
			RefType::DefRef(Nullability::NonNullable, 1),
		] {
			assert!(match_ref_type(&types, *t, *t));
		}
	}

	#[test]
	fn everything_matches_anyref() {
		let types = types();
		assert!(match_ref_type(&types, RefType::NullRef, RefType::AnyRef));
		assert!(match_ref_type(&types, RefType::FuncRef, RefType::AnyRef));
		assert!(match_ref_type(&types, RefType::DefRef(Nullability::NonNullable, 0), RefType::AnyRef));
		assert!(!match_ref_type(&types, RefType::AnyRef, RefType::FuncRef));
	}

	#[test]
	fn null_matches_nullable_refs_only() {
		let types = types();
		assert!(match_ref_type(&types, RefType::NullRef, RefType::DefRef(Nullability::Nullable, 0)));
		assert!(match_ref_type(&types, RefType::NullRef, RefType::FuncRef));
		assert!(!match_ref_type(&types, RefType::NullRef, RefType::DefRef(Nullability::NonNullable, 0)));
	}

	#[test]
	fn def_refs_widen_to_nullable_and_funcref() {
		let types = types();
		let strict = RefType::DefRef(Nullability::NonNullable, 0);
		let lax = RefType::DefRef(Nullability::Nullable, 0);
		assert!(match_ref_type(&types, strict, lax));
		assert!(!match_ref_type(&types, lax, strict));
		assert!(match_ref_type(&types, strict, RefType::FuncRef));
		// An index with no type entry is not a function reference.
		assert!(!match_ref_type(&types, RefType::DefRef(Nullability::Nullable, 7), RefType::FuncRef));
		// Distinct type indices never match.
		assert!(!match_ref_type(
			&types,
			RefType::DefRef(Nullability::Nullable, 1),
			RefType::DefRef(Nullability::Nullable, 0)
		));
	}

	#[test]
	fn bot_matches_every_value_type() {
		let types = types();
		assert!(match_value_type(&types, ValType::Bot, I32));
		assert!(match_value_type(&types, ValType::Bot, ValType::Ref(RefType::FuncRef)));
		assert!(match_value_type(&types, ValType::Bot, ValType::Bot));
		assert!(!match_value_type(&types, I32, ValType::Bot));
	}

	#[test]
	fn num_types_match_syntactically() {
		let types = types();
		assert!(match_value_type(&types, I32, I32));
		assert!(!match_value_type(&types, I32, ValType::Num(NumType::I64)));
		assert!(!match_value_type(&types, I32, ValType::Ref(RefType::AnyRef)));
	}

	#[test]
	fn stack_types_match_pointwise() {
		let types = types();
		let nonnull = ValType::Ref(RefType::DefRef(Nullability::NonNullable, 0));
		let nullable = ValType::Ref(RefType::DefRef(Nullability::Nullable, 0));
		assert!(match_stack_type(&types, &[I32, nonnull], &[I32, nullable]));
		assert!(!match_stack_type(&types, &[I32, nullable], &[I32, nonnull]));
		assert!(!match_stack_type(&types, &[I32], &[I32, I32]));
	}

	#[test]
	fn func_types_match_structurally() {
		let types = types();
		let ft = FuncType { params: vec![I32], results: vec![I32] };
		assert!(match_func_type(&types, &ft, &ft.clone()));
		let wider = FuncType { params: vec![I32, I32], results: vec![I32] };
		assert!(!match_func_type(&types, &ft, &wider));
	}
}
