use crate::error::Result;
use crate::source::Spanned;
use crate::syntax::instructions::{Expr, Idx, Instr};
use crate::syntax::types::{DefType, GlobalType, MemType, RefType, TableType, ValType};
use crate::valid;
use alloc::string::String;
use alloc::vec::Vec;

#[derive(Clone, Debug, PartialEq)]
pub struct Func {
	pub typ: Idx,
	pub locals: Vec<ValType>,
	pub body: Vec<Spanned<Instr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
	pub typ: TableType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mem {
	pub typ: MemType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Global {
	pub typ: GlobalType,
	pub init: Expr,
}

/// Placement of an element or data segment. `Declarative` only occurs on
/// element segments; its sole purpose is to declare function references.
#[derive(Clone, Debug, PartialEq)]
pub enum SegmentMode {
	Passive,
	Active { index: Idx, offset: Expr },
	Declarative,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Elem {
	pub typ: RefType,
	pub init: Vec<Expr>,
	pub mode: Spanned<SegmentMode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Data {
	pub init: Vec<u8>,
	pub mode: Spanned<SegmentMode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Start {
	pub func: Idx,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportDesc {
	Func(Idx),
	Table(TableType),
	Mem(MemType),
	Global(GlobalType),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Import {
	pub module: String,
	pub name: String,
	pub desc: Spanned<ImportDesc>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExportDesc {
	Func(Idx),
	Table(Idx),
	Mem(Idx),
	Global(Idx),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Export {
	pub name: String,
	pub desc: Spanned<ExportDesc>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
	pub types: Vec<Spanned<DefType>>,
	pub imports: Vec<Spanned<Import>>,
	pub funcs: Vec<Spanned<Func>>,
	pub tables: Vec<Spanned<Table>>,
	pub mems: Vec<Spanned<Mem>>,
	pub globals: Vec<Spanned<Global>>,
	pub elems: Vec<Spanned<Elem>>,
	pub datas: Vec<Spanned<Data>>,
	pub start: Option<Spanned<Start>>,
	pub exports: Vec<Spanned<Export>>,
}

impl Spanned<Module> {
	pub fn validate(&self) -> Result<()> {
		valid::module_validate(self)
	}
}
