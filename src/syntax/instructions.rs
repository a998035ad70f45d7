use crate::source::Spanned;
use crate::syntax::types::{NumType, ValType};
use alloc::vec::Vec;

/// An index into one of the module's index spaces. The span points at the
/// index token itself so unresolved indices get a precise diagnostic.
pub type Idx = Spanned<u32>;

/// A straight-line instruction sequence together with the span of the whole
/// expression; used for initializers and segment offsets.
pub type Expr = Spanned<Vec<Spanned<Instr>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntUnOp {
	Clz,
	Ctz,
	Popcnt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatUnOp {
	Neg,
	Abs,
	Ceil,
	Floor,
	Trunc,
	Nearest,
	Sqrt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntBinOp {
	Add,
	Sub,
	Mul,
	DivS,
	DivU,
	RemS,
	RemU,
	And,
	Or,
	Xor,
	Shl,
	ShrS,
	ShrU,
	Rotl,
	Rotr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatBinOp {
	Add,
	Sub,
	Mul,
	Div,
	Min,
	Max,
	CopySign,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntTestOp {
	Eqz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntRelOp {
	Eq,
	Ne,
	LtS,
	LtU,
	GtS,
	GtU,
	LeS,
	LeU,
	GeS,
	GeU,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatRelOp {
	Eq,
	Ne,
	Lt,
	Gt,
	Le,
	Ge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntCvtOp {
	WrapI64,
	ExtendSI32,
	ExtendUI32,
	TruncSF32,
	TruncUF32,
	TruncSF64,
	TruncUF64,
	ReinterpretFloat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatCvtOp {
	ConvertSI32,
	ConvertUI32,
	ConvertSI64,
	ConvertUI64,
	PromoteF32,
	DemoteF64,
	ReinterpretInt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
	I32(IntUnOp),
	I64(IntUnOp),
	F32(FloatUnOp),
	F64(FloatUnOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
	I32(IntBinOp),
	I64(IntBinOp),
	F32(FloatBinOp),
	F64(FloatBinOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestOp {
	I32(IntTestOp),
	I64(IntTestOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelOp {
	I32(IntRelOp),
	I64(IntRelOp),
	F32(FloatRelOp),
	F64(FloatRelOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CvtOp {
	I32(IntCvtOp),
	I64(IntCvtOp),
	F32(FloatCvtOp),
	F64(FloatCvtOp),
}

impl UnOp {
	pub fn ty(&self) -> NumType {
		match self {
			UnOp::I32(_) => NumType::I32,
			UnOp::I64(_) => NumType::I64,
			UnOp::F32(_) => NumType::F32,
			UnOp::F64(_) => NumType::F64,
		}
	}
}

impl BinOp {
	pub fn ty(&self) -> NumType {
		match self {
			BinOp::I32(_) => NumType::I32,
			BinOp::I64(_) => NumType::I64,
			BinOp::F32(_) => NumType::F32,
			BinOp::F64(_) => NumType::F64,
		}
	}
}

impl TestOp {
	pub fn ty(&self) -> NumType {
		match self {
			TestOp::I32(_) => NumType::I32,
			TestOp::I64(_) => NumType::I64,
		}
	}
}

impl RelOp {
	pub fn ty(&self) -> NumType {
		match self {
			RelOp::I32(_) => NumType::I32,
			RelOp::I64(_) => NumType::I64,
			RelOp::F32(_) => NumType::F32,
			RelOp::F64(_) => NumType::F64,
		}
	}
}

/// A numeric literal carried by `Const`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumVal {
	I32(i32),
	I64(i64),
	F32(f32),
	F64(f64),
}

impl NumVal {
	pub fn ty(&self) -> NumType {
		match self {
			NumVal::I32(_) => NumType::I32,
			NumVal::I64(_) => NumType::I64,
			NumVal::F32(_) => NumType::F32,
			NumVal::F64(_) => NumType::F64,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackSize {
	Pack8,
	Pack16,
	Pack32,
}

impl PackSize {
	pub fn size(&self) -> u32 {
		match self {
			PackSize::Pack8 => 1,
			PackSize::Pack16 => 2,
			PackSize::Pack32 => 4,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
	SignExt,
	ZeroExt,
}

/// Memory operand of a load. A packed size narrows the access; loads also
/// record how the packed value extends to the full width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOp {
	pub ty: NumType,
	pub align: u32,
	pub offset: u32,
	pub sz: Option<(PackSize, Extension)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOp {
	pub ty: NumType,
	pub align: u32,
	pub offset: u32,
	pub sz: Option<PackSize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
	Unreachable,
	Nop,
	Drop,
	Select(Option<Vec<ValType>>),
	Block(Vec<ValType>, Vec<Spanned<Instr>>),
	Loop(Vec<ValType>, Vec<Spanned<Instr>>),
	If(Vec<ValType>, Vec<Spanned<Instr>>, Vec<Spanned<Instr>>),
	Let(Vec<ValType>, Vec<ValType>, Vec<Spanned<Instr>>),
	Br(Idx),
	BrIf(Idx),
	BrTable(Vec<Idx>, Idx),
	BrOnNull(Idx),
	Return,
	Call(Idx),
	CallRef,
	CallIndirect(Idx, Idx),
	ReturnCallRef,
	FuncBind(Idx),
	LocalGet(Idx),
	LocalSet(Idx),
	LocalTee(Idx),
	GlobalGet(Idx),
	GlobalSet(Idx),
	TableGet(Idx),
	TableSet(Idx),
	TableSize(Idx),
	TableGrow(Idx),
	TableFill(Idx),
	TableCopy(Idx, Idx),
	TableInit(Idx, Idx),
	ElemDrop(Idx),
	Load(LoadOp),
	Store(StoreOp),
	MemorySize,
	MemoryGrow,
	MemoryFill,
	MemoryCopy,
	MemoryInit(Idx),
	DataDrop(Idx),
	RefNull,
	RefIsNull,
	RefAsNonNull,
	RefFunc(Idx),
	Const(NumVal),
	Test(TestOp),
	Compare(RelOp),
	Unary(UnOp),
	Binary(BinOp),
	Convert(CvtOp),
}
