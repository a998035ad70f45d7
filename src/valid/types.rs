use crate::error::{require, Result};
use crate::source::{Span, Spanned};
use crate::syntax::types::{DefType, FuncType, GlobalType, Limits, MemType, NumType, RefType, TableType, ValType};
use crate::valid::Context;

pub(super) fn check_limits(limits: &Limits, range: u64, at: Span, msg: &str) -> Result<()> {
	require(u64::from(limits.min) <= range, at, msg)?;
	if let Some(max) = limits.max {
		require(u64::from(max) <= range, at, msg)?;
		require(limits.min <= max, at, "size minimum must not be greater than maximum")?;
	}
	Ok(())
}

pub(super) fn check_num_type(_c: &Context, _t: NumType, _at: Span) -> Result<()> {
	Ok(())
}

pub(super) fn check_ref_type(c: &Context, t: RefType, at: Span) -> Result<()> {
	match t {
		RefType::AnyRef | RefType::NullRef | RefType::FuncRef => Ok(()),
		RefType::DefRef(_, x) => c.func_type(&Spanned::new(x, at)).map(|_| ()),
	}
}

pub(super) fn check_value_type(c: &Context, t: ValType, at: Span) -> Result<()> {
	match t {
		ValType::Num(t) => check_num_type(c, t, at),
		ValType::Ref(t) => check_ref_type(c, t, at),
		ValType::Bot => Ok(()),
	}
}

pub(super) fn check_arity(n: usize, at: Span) -> Result<()> {
	require(n <= 1, at, "invalid result arity, larger than 1 is not (yet) allowed")
}

pub(super) fn check_func_type(c: &Context, ft: &FuncType, at: Span) -> Result<()> {
	for t in &ft.params {
		check_value_type(c, *t, at)?;
	}
	for t in &ft.results {
		check_value_type(c, *t, at)?;
	}
	check_arity(ft.results.len(), at)
}

pub(super) fn check_table_type(c: &Context, tt: &TableType, at: Span) -> Result<()> {
	check_limits(&tt.lim, 1 << 32, at, "table size must be at most 2^32")?;
	check_ref_type(c, tt.et, at)?;
	require(tt.et.defaultable(), at, "non-defaultable element type")
}

pub(super) fn check_mem_type(_c: &Context, mt: &MemType, at: Span) -> Result<()> {
	check_limits(&mt.lim, 1 << 16, at, "memory size must be at most 65536 pages (4GiB)")
}

pub(super) fn check_global_type(c: &Context, gt: &GlobalType, at: Span) -> Result<()> {
	check_value_type(c, gt.valtype, at)
}

pub(super) fn check_def_type(c: &Context, dt: &DefType, at: Span) -> Result<()> {
	match dt {
		DefType::Func(ft) => check_func_type(c, ft, at),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloc::vec::Vec;

	const AT: Span = Span { start: 0, end: 0 };

	#[test]
	fn limits_require_min_below_max() {
		let limits = Limits { min: 4, max: Some(2) };
		let err = check_limits(&limits, 1 << 16, AT, "memory size must be at most 65536 pages (4GiB)")
			.unwrap_err();
		assert_eq!(err.message, "size minimum must not be greater than maximum");
	}

	#[test]
	fn limits_respect_the_range() {
		let limits = Limits { min: (1 << 16) + 1, max: None };
		let err = check_limits(&limits, 1 << 16, AT, "memory size must be at most 65536 pages (4GiB)")
			.unwrap_err();
		assert_eq!(err.message, "memory size must be at most 65536 pages (4GiB)");

		let limits = Limits { min: 0, max: Some(u32::MAX) };
		assert!(check_limits(&limits, 1 << 32, AT, "table size must be at most 2^32").is_ok());
	}

	#[test]
	fn table_element_type_must_be_defaultable() {
		let mut c = Context::default();
		c.types = vec![DefType::Func(FuncType::default())];
		let tt = TableType {
			lim: Limits { min: 0, max: None },
			et: RefType::DefRef(crate::syntax::types::Nullability::NonNullable, 0),
		};
		let err = check_table_type(&c, &tt, AT).unwrap_err();
		assert_eq!(err.message, "non-defaultable element type");
	}

	#[test]
	fn func_type_result_arity_is_limited() {
		let c = Context::default();
		let i32 = ValType::Num(NumType::I32);
		let ft = FuncType { params: Vec::new(), results: vec![i32, i32] };
		let err = check_func_type(&c, &ft, AT).unwrap_err();
		assert_eq!(err.message, "invalid result arity, larger than 1 is not (yet) allowed");
	}

	#[test]
	fn def_ref_types_must_resolve() {
		let c = Context::default();
		let t = RefType::DefRef(crate::syntax::types::Nullability::Nullable, 3);
		let err = check_ref_type(&c, t, AT).unwrap_err();
		assert_eq!(err.message, "unknown type 3");
	}
}
