//! The validator proper: contexts, per-instruction stack contracts, and the
//! module driver.

mod instructions;
mod modules;
mod types;

use crate::error::{error, Error, Result};
use crate::source::{Span, Spanned};
use crate::syntax::instructions::Idx;
use crate::syntax::modules::Module;
use crate::syntax::types::{DefType, FuncType, GlobalType, MemType, RefType, TableType, ValType};
use alloc::vec::Vec;
use hashbrown::HashSet;

/// Validate a parsed module. Returns `Ok(())` when the module is well-typed
/// and the first diagnostic otherwise.
pub fn module_validate(module: &Spanned<Module>) -> Result<()> {
	info!("validating module...");
	modules::check_module(module)
}

/// The indexed environments a checker can see. Index spaces are populated
/// imports first, then declarations; `locals`, `results`, and `labels`
/// describe the enclosing function and block scopes, with `labels[0]` the
/// innermost enclosing label.
#[derive(Clone, Debug, Default)]
pub(crate) struct Context {
	pub types: Vec<DefType>,
	pub funcs: Vec<u32>,
	pub tables: Vec<TableType>,
	pub memories: Vec<MemType>,
	pub globals: Vec<GlobalType>,
	pub elems: Vec<RefType>,
	pub datas: Vec<()>,
	pub locals: Vec<ValType>,
	pub results: Vec<ValType>,
	pub labels: Vec<Vec<ValType>>,
	pub refs: HashSet<u32>,
}

fn lookup<'a, T>(category: &str, list: &'a [T], x: &Idx) -> Result<&'a T> {
	list.get(x.it as usize)
		.ok_or_else(|| Error { at: x.at, message: format!("unknown {} {}", category, x.it) })
}

impl Context {
	pub fn typ(&self, x: &Idx) -> Result<&DefType> {
		lookup("type", &self.types, x)
	}

	pub fn func(&self, x: &Idx) -> Result<u32> {
		lookup("function", &self.funcs, x).map(|y| *y)
	}

	pub fn table(&self, x: &Idx) -> Result<TableType> {
		lookup("table", &self.tables, x).map(|tt| *tt)
	}

	pub fn memory(&self, x: &Idx) -> Result<MemType> {
		lookup("memory", &self.memories, x).map(|mt| *mt)
	}

	pub fn global(&self, x: &Idx) -> Result<GlobalType> {
		lookup("global", &self.globals, x).map(|gt| *gt)
	}

	pub fn elem(&self, x: &Idx) -> Result<RefType> {
		lookup("elem segment", &self.elems, x).map(|rt| *rt)
	}

	pub fn data(&self, x: &Idx) -> Result<()> {
		lookup("data segment", &self.datas, x).map(|_| ())
	}

	pub fn local(&self, x: &Idx) -> Result<ValType> {
		lookup("local", &self.locals, x).map(|t| *t)
	}

	pub fn label(&self, x: &Idx) -> Result<Vec<ValType>> {
		lookup("label", &self.labels, x).map(|ts| ts.clone())
	}

	/// The function type a type index resolves to.
	pub fn func_type(&self, x: &Idx) -> Result<&FuncType> {
		match self.typ(x)? {
			DefType::Func(ft) => Ok(ft),
		}
	}

	/// Like `func_type` but for an index synthesized by the checker itself,
	/// attributed to `at`.
	pub fn func_type_at(&self, y: u32, at: Span) -> Result<&FuncType> {
		self.func_type(&Spanned::new(y, at))
	}

	/// Gate for `RefFunc`: the function must be declared by some element
	/// segment.
	pub fn refer_func(&self, x: &Idx) -> Result<()> {
		if self.refs.contains(&x.it) {
			Ok(())
		} else {
			error(x.at, format!("undeclared function reference {}", x.it))
		}
	}
}
