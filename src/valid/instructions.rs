use crate::error::{error, require, Result};
use crate::source::{Span, Spanned};
use crate::subtype::{match_func_type, match_ref_type, match_stack_type, match_value_type};
use crate::syntax::instructions::{CvtOp, Expr, FloatCvtOp, Instr, IntCvtOp, PackSize};
use crate::syntax::types::{FuncType, Mut, Nullability, NumType, Poly, RefType, StackShape, ValType};
use crate::valid::types::{check_arity, check_value_type};
use crate::valid::Context;
use alloc::vec::Vec;
use core::iter::once;

const I32: ValType = ValType::Num(NumType::I32);

/// Stack contract of one instruction. The checker threads `StackShape`s
/// through the sequence; a shape turns `Open` below stack-polymorphic
/// instructions (`Unreachable`, `Br`, ...).
pub(super) struct OpType {
	pub ins: StackShape,
	pub outs: StackShape,
}

/// `ins --> outs`: the classical closed contract.
fn fixed(ins: Vec<ValType>, outs: Vec<ValType>) -> OpType {
	OpType { ins: StackShape::closed(ins), outs: StackShape::closed(outs) }
}

/// `ins -->... outs`: a stack-polymorphic contract absorbing any prefix
/// below `ins` and leaving the stack open.
fn poly(ins: Vec<ValType>, outs: Vec<ValType>) -> OpType {
	OpType { ins: StackShape::open(ins), outs: StackShape::open(outs) }
}

/// Pointwise subtype comparison of the stack's top against an expectation.
fn check_stack(c: &Context, actual: &[ValType], expected: &[ValType], at: Span) -> Result<()> {
	let ok = actual.len() == expected.len()
		&& actual.iter().zip(expected).all(|(a, e)| match_value_type(&c.types, *a, *e));
	if !ok {
		return error(
			at,
			format!(
				"type mismatch: operator requires {} but stack has {}",
				StackShape::closed(expected.to_vec()),
				StackShape::closed(actual.to_vec())
			),
		);
	}
	Ok(())
}

/// Consume `ins` from the top of `s`, widening unknown slots with `Bot`
/// when the stack is open. Returns the residual stack.
fn pop(c: &Context, ins: &StackShape, s: StackShape, at: Span) -> Result<StackShape> {
	let n1 = ins.tail.len();
	let n2 = s.tail.len();
	let n = n1.min(n2);
	let missing = if s.poly == Poly::Open { n1 - n } else { 0 };
	let mut actual = vec![ValType::Bot; missing];
	actual.extend_from_slice(&s.tail[n2 - n..]);
	check_stack(c, &actual, &ins.tail, at)?;
	let tail = if ins.poly == Poly::Open { Vec::new() } else { s.tail[..n2 - n].to_vec() };
	Ok(StackShape { poly: s.poly, tail })
}

/// Produce `outs` on top of the residual stack.
fn push(outs: StackShape, s: StackShape) -> StackShape {
	debug_assert!(outs.poly == Poly::Closed || outs.tail.is_empty());
	let poly = if outs.poly == Poly::Open || s.poly == Poly::Open { Poly::Open } else { Poly::Closed };
	let mut tail = s.tail;
	tail.extend(outs.tail);
	StackShape { poly, tail }
}

/// The `i`-th slot from the top; `Bot` when the slot is unknown.
fn peek(i: usize, s: &StackShape) -> ValType {
	let n = s.tail.len();
	if i < n {
		s.tail[n - 1 - i]
	} else {
		ValType::Bot
	}
}

/// Result arity plus well-formedness of a block's declared result types.
fn check_stack_type(c: &Context, ts: &[ValType], at: Span) -> Result<()> {
	check_arity(ts.len(), at)?;
	for t in ts {
		check_value_type(c, *t, at)?;
	}
	Ok(())
}

fn with_label(c: &Context, ts: Vec<ValType>) -> Context {
	let mut c1 = c.clone();
	c1.labels = once(ts).chain(c.labels.iter().cloned()).collect();
	c1
}

fn check_memop(c: &Context, ty: NumType, align: u32, sz: Option<PackSize>, at: Span) -> Result<()> {
	c.memory(&Spanned::new(0, at))?;
	let size = match sz {
		Some(sz) => {
			require(ty == NumType::I64 || sz != PackSize::Pack32, at, "memory size too big")?;
			sz.size()
		},
		None => ty.size(),
	};
	let natural = 1u64.checked_shl(align).map_or(false, |a| a <= u64::from(size));
	require(natural, at, "alignment must not be larger than natural")
}

fn check_cvtop(op: &CvtOp, at: Span) -> Result<(NumType, NumType)> {
	use NumType::*;
	Ok(match op {
		CvtOp::I32(op) => match op {
			IntCvtOp::WrapI64 => (I64, I32),
			IntCvtOp::TruncSF32 | IntCvtOp::TruncUF32 => (F32, I32),
			IntCvtOp::TruncSF64 | IntCvtOp::TruncUF64 => (F64, I32),
			IntCvtOp::ReinterpretFloat => (F32, I32),
			IntCvtOp::ExtendSI32 | IntCvtOp::ExtendUI32 => return error(at, "invalid conversion"),
		},
		CvtOp::I64(op) => match op {
			IntCvtOp::ExtendSI32 | IntCvtOp::ExtendUI32 => (I32, I64),
			IntCvtOp::TruncSF32 | IntCvtOp::TruncUF32 => (F32, I64),
			IntCvtOp::TruncSF64 | IntCvtOp::TruncUF64 => (F64, I64),
			IntCvtOp::ReinterpretFloat => (F64, I64),
			IntCvtOp::WrapI64 => return error(at, "invalid conversion"),
		},
		CvtOp::F32(op) => match op {
			FloatCvtOp::ConvertSI32 | FloatCvtOp::ConvertUI32 => (I32, F32),
			FloatCvtOp::ConvertSI64 | FloatCvtOp::ConvertUI64 => (I64, F32),
			FloatCvtOp::DemoteF64 => (F64, F32),
			FloatCvtOp::ReinterpretInt => (I32, F32),
			FloatCvtOp::PromoteF32 => return error(at, "invalid conversion"),
		},
		CvtOp::F64(op) => match op {
			FloatCvtOp::ConvertSI32 | FloatCvtOp::ConvertUI32 => (I32, F64),
			FloatCvtOp::ConvertSI64 | FloatCvtOp::ConvertUI64 => (I64, F64),
			FloatCvtOp::PromoteF32 => (F32, F64),
			FloatCvtOp::ReinterpretInt => (I64, F64),
			FloatCvtOp::DemoteF64 => return error(at, "invalid conversion"),
		},
	})
}

/// Contract of a single instruction against the current inferred stack.
/// The stack is only peeked, never consumed here; the caller pops `ins`
/// and pushes `outs`. Peeking is what resolves the polymorphic contracts
/// (`Select` without annotation, `CallRef`, `BrOnNull`, `RefAsNonNull`).
fn check_instr(c: &Context, e: &Spanned<Instr>, s: &StackShape) -> Result<OpType> {
	Ok(match &e.it {
		Instr::Unreachable => poly(vec![], vec![]),
		Instr::Nop => fixed(vec![], vec![]),
		Instr::Drop => fixed(vec![peek(0, s)], vec![]),
		Instr::Select(None) => {
			let t = peek(1, s);
			if !t.is_num() {
				return error(e.at, format!("type mismatch: select requires numeric type but stack has {}", t));
			}
			fixed(vec![t, t, I32], vec![t])
		},
		Instr::Select(Some(ts)) => {
			require(!ts.is_empty(), e.at, "invalid result arity, 0 is not (yet) allowed")?;
			check_arity(ts.len(), e.at)?;
			for t in ts {
				check_value_type(c, *t, e.at)?;
			}
			let mut ins: Vec<ValType> = ts.iter().chain(ts.iter()).copied().collect();
			ins.push(I32);
			fixed(ins, ts.clone())
		},
		Instr::Block(ts, es) => {
			check_stack_type(c, ts, e.at)?;
			check_block(&with_label(c, ts.clone()), es, ts, e.at)?;
			fixed(vec![], ts.clone())
		},
		Instr::Loop(ts, es) => {
			check_stack_type(c, ts, e.at)?;
			check_block(&with_label(c, Vec::new()), es, ts, e.at)?;
			fixed(vec![], ts.clone())
		},
		Instr::If(ts, es1, es2) => {
			check_stack_type(c, ts, e.at)?;
			let c1 = with_label(c, ts.clone());
			check_block(&c1, es1, ts, e.at)?;
			check_block(&c1, es2, ts, e.at)?;
			fixed(vec![I32], ts.clone())
		},
		Instr::Let(ts, locals, es) => {
			check_stack_type(c, ts, e.at)?;
			for t in locals {
				check_value_type(c, *t, e.at)?;
			}
			let mut c1 = with_label(c, ts.clone());
			c1.locals = locals.iter().chain(c.locals.iter()).copied().collect();
			check_block(&c1, es, ts, e.at)?;
			fixed(locals.clone(), ts.clone())
		},
		Instr::Br(x) => poly(c.label(x)?, vec![]),
		Instr::BrIf(x) => {
			let ts = c.label(x)?;
			let mut ins = ts.clone();
			ins.push(I32);
			fixed(ins, ts)
		},
		Instr::BrTable(xs, x) => {
			let n = c.label(x)?.len();
			let ts: Vec<ValType> = (0..n).map(|i| peek(n - i, s)).collect();
			check_stack(c, &ts, &c.label(x)?, x.at)?;
			for x1 in xs {
				check_stack(c, &ts, &c.label(x1)?, x1.at)?;
			}
			let mut ins = ts;
			ins.push(I32);
			poly(ins, vec![])
		},
		Instr::BrOnNull(x) => {
			let ts = c.label(x)?;
			match peek(0, s) {
				ValType::Bot => poly(vec![], vec![]),
				ValType::Ref(RefType::DefRef(_, y)) => {
					let mut ins = ts.clone();
					ins.push(ValType::Ref(RefType::DefRef(Nullability::Nullable, y)));
					let mut outs = ts;
					outs.push(ValType::Ref(RefType::DefRef(Nullability::NonNullable, y)));
					fixed(ins, outs)
				},
				t => {
					return error(
						e.at,
						format!("type mismatch: expected function reference but stack has {}", t),
					)
				},
			}
		},
		Instr::Return => poly(c.results.clone(), vec![]),
		Instr::Call(x) => {
			let y = c.func(x)?;
			let ft = c.func_type_at(y, e.at)?;
			fixed(ft.params.clone(), ft.results.clone())
		},
		Instr::CallRef => match peek(0, s) {
			ValType::Bot => poly(vec![], vec![]),
			ValType::Ref(RefType::DefRef(nul, y)) => {
				let ft = c.func_type_at(y, e.at)?;
				let mut ins = ft.params.clone();
				ins.push(ValType::Ref(RefType::DefRef(nul, y)));
				fixed(ins, ft.results.clone())
			},
			t => {
				return error(e.at, format!("type mismatch: expected function reference but stack has {}", t))
			},
		},
		Instr::CallIndirect(x, y) => {
			let tt = c.table(x)?;
			if !match_ref_type(&c.types, tt.et, RefType::FuncRef) {
				return error(
					x.at,
					format!("type mismatch: table element type {} is not a function reference", tt.et),
				);
			}
			let ft = c.func_type(y)?;
			let mut ins = ft.params.clone();
			ins.push(I32);
			fixed(ins, ft.results.clone())
		},
		Instr::ReturnCallRef => match peek(0, s) {
			ValType::Bot => poly(vec![], vec![]),
			ValType::Ref(RefType::DefRef(nul, y)) => {
				let ft = c.func_type_at(y, e.at)?.clone();
				if !match_stack_type(&c.types, &ft.results, &c.results) {
					return error(
						e.at,
						format!(
							"type mismatch: current function requires result type {} but callee returns {}",
							StackShape::closed(c.results.clone()),
							StackShape::closed(ft.results.clone())
						),
					);
				}
				let mut ins = ft.params;
				ins.push(ValType::Ref(RefType::DefRef(nul, y)));
				poly(ins, vec![])
			},
			t => {
				return error(e.at, format!("type mismatch: expected function reference but stack has {}", t))
			},
		},
		Instr::FuncBind(x) => {
			let target = c.func_type(x)?.clone();
			match peek(0, s) {
				ValType::Bot => poly(vec![], vec![]),
				ValType::Ref(RefType::DefRef(nul, y)) => {
					let ft = c.func_type_at(y, e.at)?.clone();
					if ft.params.len() < target.params.len() {
						return error(
							e.at,
							format!("type mismatch: function type {} has fewer parameters than {}", ft, target),
						);
					}
					let (bound, rest) = ft.params.split_at(ft.params.len() - target.params.len());
					let bind = FuncType { params: rest.to_vec(), results: ft.results.clone() };
					if !match_func_type(&c.types, &bind, &target) {
						return error(
							e.at,
							format!("type mismatch: binding produces type {} but expected {}", bind, target),
						);
					}
					let mut ins = bound.to_vec();
					ins.push(ValType::Ref(RefType::DefRef(nul, y)));
					fixed(ins, vec![ValType::Ref(RefType::DefRef(Nullability::NonNullable, x.it))])
				},
				t => {
					return error(
						e.at,
						format!("type mismatch: expected function reference but stack has {}", t),
					)
				},
			}
		},
		Instr::LocalGet(x) => fixed(vec![], vec![c.local(x)?]),
		Instr::LocalSet(x) => fixed(vec![c.local(x)?], vec![]),
		Instr::LocalTee(x) => {
			let t = c.local(x)?;
			fixed(vec![t], vec![t])
		},
		Instr::GlobalGet(x) => fixed(vec![], vec![c.global(x)?.valtype]),
		Instr::GlobalSet(x) => {
			let gt = c.global(x)?;
			require(gt.muta == Mut::Var, x.at, "global is immutable")?;
			fixed(vec![gt.valtype], vec![])
		},
		Instr::TableGet(x) => {
			let tt = c.table(x)?;
			fixed(vec![I32], vec![ValType::Ref(tt.et)])
		},
		Instr::TableSet(x) => {
			let tt = c.table(x)?;
			fixed(vec![I32, ValType::Ref(tt.et)], vec![])
		},
		Instr::TableSize(x) => {
			c.table(x)?;
			fixed(vec![], vec![I32])
		},
		Instr::TableGrow(x) => {
			let tt = c.table(x)?;
			fixed(vec![ValType::Ref(tt.et), I32], vec![I32])
		},
		Instr::TableFill(x) => {
			let tt = c.table(x)?;
			fixed(vec![I32, ValType::Ref(tt.et), I32], vec![])
		},
		Instr::TableCopy(x, y) => {
			let dst = c.table(x)?;
			let src = c.table(y)?;
			if !match_ref_type(&c.types, src.et, dst.et) {
				return error(
					e.at,
					format!("type mismatch: table element type {} does not match type {}", src.et, dst.et),
				);
			}
			fixed(vec![I32, I32, I32], vec![])
		},
		Instr::TableInit(x, y) => {
			let tt = c.table(x)?;
			let rt = c.elem(y)?;
			if !match_ref_type(&c.types, rt, tt.et) {
				return error(
					e.at,
					format!("type mismatch: element segment type {} does not match type {}", rt, tt.et),
				);
			}
			fixed(vec![I32, I32, I32], vec![])
		},
		Instr::ElemDrop(x) => {
			c.elem(x)?;
			fixed(vec![], vec![])
		},
		Instr::Load(op) => {
			check_memop(c, op.ty, op.align, op.sz.map(|(sz, _)| sz), e.at)?;
			fixed(vec![I32], vec![ValType::Num(op.ty)])
		},
		Instr::Store(op) => {
			check_memop(c, op.ty, op.align, op.sz, e.at)?;
			fixed(vec![I32, ValType::Num(op.ty)], vec![])
		},
		Instr::MemorySize => {
			c.memory(&Spanned::new(0, e.at))?;
			fixed(vec![], vec![I32])
		},
		Instr::MemoryGrow => {
			c.memory(&Spanned::new(0, e.at))?;
			fixed(vec![I32], vec![I32])
		},
		Instr::MemoryFill => {
			c.memory(&Spanned::new(0, e.at))?;
			fixed(vec![I32, I32, I32], vec![])
		},
		Instr::MemoryCopy => {
			c.memory(&Spanned::new(0, e.at))?;
			fixed(vec![I32, I32, I32], vec![])
		},
		Instr::MemoryInit(x) => {
			c.memory(&Spanned::new(0, e.at))?;
			c.data(x)?;
			fixed(vec![I32, I32, I32], vec![])
		},
		Instr::DataDrop(x) => {
			c.data(x)?;
			fixed(vec![], vec![])
		},
		Instr::RefNull => fixed(vec![], vec![ValType::Ref(RefType::NullRef)]),
		Instr::RefIsNull => fixed(vec![ValType::Ref(RefType::AnyRef)], vec![I32]),
		Instr::RefAsNonNull => match peek(0, s) {
			ValType::Bot => poly(vec![], vec![]),
			ValType::Ref(RefType::DefRef(nul, y)) => fixed(
				vec![ValType::Ref(RefType::DefRef(nul, y))],
				vec![ValType::Ref(RefType::DefRef(Nullability::NonNullable, y))],
			),
			t => return error(e.at, format!("type mismatch: expected reference type but stack has {}", t)),
		},
		Instr::RefFunc(x) => {
			let y = c.func(x)?;
			c.refer_func(x)?;
			fixed(vec![], vec![ValType::Ref(RefType::DefRef(Nullability::NonNullable, y))])
		},
		Instr::Const(v) => fixed(vec![], vec![ValType::Num(v.ty())]),
		Instr::Test(op) => fixed(vec![ValType::Num(op.ty())], vec![I32]),
		Instr::Compare(op) => {
			let t = ValType::Num(op.ty());
			fixed(vec![t, t], vec![I32])
		},
		Instr::Unary(op) => {
			let t = ValType::Num(op.ty());
			fixed(vec![t], vec![t])
		},
		Instr::Binary(op) => {
			let t = ValType::Num(op.ty());
			fixed(vec![t, t], vec![t])
		},
		Instr::Convert(op) => {
			let (t1, t2) = check_cvtop(op, e.at)?;
			fixed(vec![ValType::Num(t1)], vec![ValType::Num(t2)])
		},
	})
}

/// Fold the per-instruction contracts over a straight-line sequence,
/// threading the inferred stack so each instruction can peek at it.
pub(super) fn check_seq(c: &Context, es: &[Spanned<Instr>]) -> Result<StackShape> {
	let mut s = StackShape::closed(Vec::new());
	for e in es {
		let OpType { ins, outs } = check_instr(c, e, &s)?;
		s = push(outs, pop(c, &ins, s, e.at)?);
	}
	Ok(s)
}

/// Check that a sequence produces exactly `ts` on top of whatever was below.
pub(super) fn check_block(c: &Context, es: &[Spanned<Instr>], ts: &[ValType], at: Span) -> Result<()> {
	let s = check_seq(c, es)?;
	let s1 = pop(c, &StackShape::closed(ts.to_vec()), s.clone(), at)?;
	if !s1.tail.is_empty() {
		return error(
			at,
			format!("type mismatch: block requires {} but stack has {}", StackShape::closed(ts.to_vec()), s),
		);
	}
	Ok(())
}

fn is_const(c: &Context, e: &Spanned<Instr>) -> bool {
	match &e.it {
		Instr::RefNull | Instr::RefFunc(_) | Instr::Const(_) => true,
		// Initializers run before the module's own globals exist, so a
		// global that does not resolve here is just as non-constant as a
		// mutable one.
		Instr::GlobalGet(x) => c.global(x).map_or(false, |gt| gt.muta == Mut::Const),
		_ => false,
	}
}

/// An initializer: a straight-line sequence of constant instructions
/// producing the single declared type.
pub(super) fn check_const(c: &Context, expr: &Expr, t: ValType) -> Result<()> {
	for e in &expr.it {
		require(is_const(c, e), e.at, "constant expression required")?;
	}
	check_block(c, &expr.it, &[t], expr.at)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::types::DefType;

	const AT: Span = Span { start: 0, end: 0 };
	const I64: ValType = ValType::Num(NumType::I64);

	fn sp<T>(it: T) -> Spanned<T> {
		Spanned::new(it, AT)
	}

	#[test]
	fn peek_reads_from_the_top() {
		let s = StackShape::closed(vec![I64, I32]);
		assert_eq!(peek(0, &s), I32);
		assert_eq!(peek(1, &s), I64);
		assert_eq!(peek(2, &s), ValType::Bot);
	}

	#[test]
	fn pop_matches_the_top_slots() {
		let c = Context::default();
		let s = StackShape::closed(vec![I64, I32]);
		let s1 = pop(&c, &StackShape::closed(vec![I32]), s, AT).unwrap();
		assert_eq!(s1, StackShape::closed(vec![I64]));
	}

	#[test]
	fn pop_underflow_reports_both_shapes() {
		let c = Context::default();
		let s = StackShape::closed(vec![]);
		let err = pop(&c, &StackShape::closed(vec![I32]), s, AT).unwrap_err();
		assert_eq!(err.message, "type mismatch: operator requires [i32] but stack has []");
	}

	#[test]
	fn pop_widens_an_open_stack_with_bot() {
		let c = Context::default();
		let s = StackShape::open(vec![I32]);
		let s1 = pop(&c, &StackShape::closed(vec![I64, I32]), s, AT).unwrap();
		assert_eq!(s1, StackShape::open(vec![]));
	}

	#[test]
	fn open_ins_clears_the_residual_tail() {
		let c = Context::default();
		let s = StackShape::closed(vec![I64, I32]);
		let s1 = pop(&c, &StackShape::open(vec![I32]), s, AT).unwrap();
		assert_eq!(s1, StackShape::closed(vec![]));
	}

	#[test]
	fn push_keeps_openness() {
		let s = push(StackShape::closed(vec![I32]), StackShape::open(vec![]));
		assert_eq!(s, StackShape::open(vec![I32]));
	}

	#[test]
	fn unreachable_opens_the_sequence_stack() {
		let c = Context::default();
		let es = vec![sp(Instr::Unreachable), sp(Instr::Const(crate::syntax::instructions::NumVal::I32(0))), sp(Instr::Drop)];
		let s = check_seq(&c, &es).unwrap();
		assert_eq!(s, StackShape::open(vec![]));
	}

	#[test]
	fn invalid_conversions_are_rejected() {
		assert_eq!(check_cvtop(&CvtOp::I32(IntCvtOp::WrapI64), AT).unwrap(), (NumType::I64, NumType::I32));
		let err = check_cvtop(&CvtOp::I32(IntCvtOp::ExtendSI32), AT).unwrap_err();
		assert_eq!(err.message, "invalid conversion");
		let err = check_cvtop(&CvtOp::I64(IntCvtOp::WrapI64), AT).unwrap_err();
		assert_eq!(err.message, "invalid conversion");
		let err = check_cvtop(&CvtOp::F32(FloatCvtOp::PromoteF32), AT).unwrap_err();
		assert_eq!(err.message, "invalid conversion");
		let err = check_cvtop(&CvtOp::F64(FloatCvtOp::DemoteF64), AT).unwrap_err();
		assert_eq!(err.message, "invalid conversion");
	}

	#[test]
	fn memop_alignment_is_bounded_by_the_access_size() {
		let mut c = Context::default();
		c.memories = vec![crate::syntax::types::MemType {
			lim: crate::syntax::types::Limits { min: 1, max: None },
		}];
		assert!(check_memop(&c, NumType::I32, 2, None, AT).is_ok());
		let err = check_memop(&c, NumType::I32, 3, None, AT).unwrap_err();
		assert_eq!(err.message, "alignment must not be larger than natural");
		let err = check_memop(&c, NumType::I32, 0, Some(PackSize::Pack32), AT).unwrap_err();
		assert_eq!(err.message, "memory size too big");
		assert!(check_memop(&c, NumType::I64, 2, Some(PackSize::Pack32), AT).is_ok());
	}

	#[test]
	fn call_ref_resolves_through_the_peeked_reference() {
		let mut c = Context::default();
		c.types = vec![DefType::Func(FuncType { params: vec![I32], results: vec![I64] })];
		let fref = ValType::Ref(RefType::DefRef(Nullability::Nullable, 0));
		let s = StackShape::closed(vec![I32, fref]);
		let op = check_instr(&c, &sp(Instr::CallRef), &s).unwrap();
		assert_eq!(op.ins.tail, vec![I32, fref]);
		assert_eq!(op.outs.tail, vec![I64]);
	}

	#[test]
	fn const_expressions_reject_non_const_instructions() {
		let c = Context::default();
		let expr = sp(vec![
			sp(Instr::Const(crate::syntax::instructions::NumVal::I32(1))),
			sp(Instr::Drop),
			sp(Instr::Const(crate::syntax::instructions::NumVal::I32(2))),
		]);
		let err = check_const(&c, &expr, I32).unwrap_err();
		assert_eq!(err.message, "constant expression required");
	}

	#[test]
	fn const_expressions_treat_unresolvable_globals_as_non_const() {
		let c = Context::default();
		let expr = sp(vec![sp(Instr::GlobalGet(sp(0)))]);
		let err = check_const(&c, &expr, I32).unwrap_err();
		assert_eq!(err.message, "constant expression required");
	}
}
