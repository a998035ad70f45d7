use crate::error::{error, require, Result};
use crate::free;
use crate::source::Spanned;
use crate::subtype::match_ref_type;
use crate::syntax::modules::{
	Data, Elem, Export, ExportDesc, Func, Global, Import, ImportDesc, Mem, Module, SegmentMode, Start, Table,
};
use crate::syntax::types::{DefType, NumType, RefType, ValType};
use crate::valid::instructions::{check_block, check_const};
use crate::valid::types::{
	check_def_type, check_global_type, check_mem_type, check_ref_type, check_table_type, check_value_type,
};
use crate::valid::Context;
use alloc::string::String;
use hashbrown::HashSet;

fn check_type(c: &Context, ty: &Spanned<DefType>) -> Result<()> {
	check_def_type(c, &ty.it, ty.at)
}

fn check_func(c: &Context, f: &Spanned<Func>) -> Result<()> {
	trace!("checking function body at {}", f.at);
	let ft = c.func_type(&f.it.typ)?.clone();
	for t in &f.it.locals {
		check_value_type(c, *t, f.at)?;
		require(t.defaultable(), f.at, "non-defaultable local type")?;
	}
	let mut c1 = c.clone();
	c1.locals = ft.params.iter().chain(f.it.locals.iter()).copied().collect();
	c1.results = ft.results.clone();
	c1.labels = vec![ft.results.clone()];
	check_block(&c1, &f.it.body, &ft.results, f.at)
}

fn check_table(c: &Context, t: &Spanned<Table>) -> Result<()> {
	check_table_type(c, &t.it.typ, t.at)
}

fn check_mem(c: &Context, m: &Spanned<Mem>) -> Result<()> {
	check_mem_type(c, &m.it.typ, m.at)
}

fn check_global(c: &Context, g: &Spanned<Global>) -> Result<()> {
	check_global_type(c, &g.it.typ, g.at)?;
	check_const(c, &g.it.init, g.it.typ.valtype)
}

fn check_elem_mode(c: &Context, t: RefType, mode: &Spanned<SegmentMode>) -> Result<()> {
	match &mode.it {
		SegmentMode::Passive | SegmentMode::Declarative => Ok(()),
		SegmentMode::Active { index, offset } => {
			let tt = c.table(index)?;
			if !match_ref_type(&c.types, t, tt.et) {
				return error(
					mode.at,
					format!("type mismatch: element segment type {} does not match type {}", t, tt.et),
				);
			}
			check_const(c, offset, ValType::Num(NumType::I32))
		},
	}
}

fn check_elem(c: &Context, seg: &Spanned<Elem>) -> Result<()> {
	check_ref_type(c, seg.it.typ, seg.at)?;
	for init in &seg.it.init {
		check_const(c, init, ValType::Ref(seg.it.typ))?;
	}
	check_elem_mode(c, seg.it.typ, &seg.it.mode)
}

fn check_data(c: &Context, seg: &Spanned<Data>) -> Result<()> {
	match &seg.it.mode.it {
		SegmentMode::Passive => Ok(()),
		SegmentMode::Active { index, offset } => {
			c.memory(index)?;
			check_const(c, offset, ValType::Num(NumType::I32))
		},
		// The parser never produces declarative data segments.
		SegmentMode::Declarative => unreachable!("declarative data segment"),
	}
}

fn check_start(c: &Context, start: &Spanned<Start>) -> Result<()> {
	let y = c.func(&start.it.func)?;
	let ft = c.func_type_at(y, start.at)?;
	require(
		ft.params.is_empty() && ft.results.is_empty(),
		start.at,
		"start function must not have parameters or results",
	)
}

fn check_import(mut c: Context, im: &Spanned<Import>) -> Result<Context> {
	match &im.it.desc.it {
		ImportDesc::Func(x) => {
			c.func_type(x)?;
			c.funcs.push(x.it);
		},
		ImportDesc::Table(tt) => {
			check_table_type(&c, tt, im.it.desc.at)?;
			c.tables.push(*tt);
		},
		ImportDesc::Mem(mt) => {
			check_mem_type(&c, mt, im.it.desc.at)?;
			c.memories.push(*mt);
		},
		ImportDesc::Global(gt) => {
			check_global_type(&c, gt, im.it.desc.at)?;
			c.globals.push(*gt);
		},
	}
	Ok(c)
}

fn check_export(c: &Context, mut names: HashSet<String>, ex: &Spanned<Export>) -> Result<HashSet<String>> {
	match &ex.it.desc.it {
		ExportDesc::Func(x) => {
			c.func(x)?;
		},
		ExportDesc::Table(x) => {
			c.table(x)?;
		},
		ExportDesc::Mem(x) => {
			c.memory(x)?;
		},
		ExportDesc::Global(x) => {
			c.global(x)?;
		},
	}
	require(!names.contains(&ex.it.name), ex.at, "duplicate export name")?;
	names.insert(ex.it.name.clone());
	Ok(names)
}

/// Contexts are assembled in three phases: types and the declared-reference
/// set, then imports, then every non-global declaration, and globals last.
/// Global initializers may thus refer to imported globals and declared
/// functions but not to the module's own globals, while function bodies see
/// everything.
pub(super) fn check_module(m: &Spanned<Module>) -> Result<()> {
	let module = &m.it;

	let c0 = Context {
		types: module.types.iter().map(|ty| ty.it.clone()).collect(),
		refs: free::list(free::elem, &module.elems).funcs,
		..Context::default()
	};
	let c0 = module.imports.iter().try_fold(c0, check_import)?;

	let mut c1 = c0;
	c1.funcs.extend(module.funcs.iter().map(|f| f.it.typ.it));
	c1.tables.extend(module.tables.iter().map(|t| t.it.typ));
	c1.memories.extend(module.mems.iter().map(|mm| mm.it.typ));
	c1.elems = module.elems.iter().map(|seg| seg.it.typ).collect();
	c1.datas = module.datas.iter().map(|_| ()).collect();

	let mut c = c1.clone();
	c.globals.extend(module.globals.iter().map(|g| g.it.typ));

	for ty in &module.types {
		check_type(&c1, ty)?;
	}
	for g in &module.globals {
		check_global(&c1, g)?;
	}
	for t in &module.tables {
		check_table(&c1, t)?;
	}
	for mm in &module.mems {
		check_mem(&c1, mm)?;
	}
	for seg in &module.elems {
		check_elem(&c1, seg)?;
	}
	for seg in &module.datas {
		check_data(&c1, seg)?;
	}
	for f in &module.funcs {
		check_func(&c, f)?;
	}
	if let Some(start) = &module.start {
		check_start(&c1, start)?;
	}

	module
		.exports
		.iter()
		.try_fold(HashSet::new(), |names, ex| check_export(&c, names, ex))?;

	require(c.memories.len() <= 1, m.at, "multiple memories are not allowed (yet)")
}
