// ABOUTME: Fixed, read-only catalog of named constants and built-in math functions

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One entry in the built-in catalog: a constant, a unary function, or a
/// binary function. All catalog entries are pure by construction — the only
/// impure leaf in the tree is a user-bound variable (see `node::Node::Variable`).
#[derive(Clone, Copy)]
pub enum CatalogEntry {
    Constant(f64),
    Fn1(fn(f64) -> f64),
    Fn2(fn(f64, f64) -> f64),
}

impl CatalogEntry {
    pub fn arity(&self) -> usize {
        match self {
            CatalogEntry::Constant(_) => 0,
            CatalogEntry::Fn1(_) => 1,
            CatalogEntry::Fn2(_) => 2,
        }
    }
}

/// `n choose r`, rounding inputs to the nearest integer and saturating to
/// `0.0` outside the combinatorial domain rather than producing NaN or
/// panicking — keeps the engine's evaluation path total.
fn ncr(n: f64, r: f64) -> f64 {
    let n = n.round();
    let r = r.round();
    if r < 0.0 || r > n || n < 0.0 {
        return 0.0;
    }
    let r = if r > n - r { n - r } else { r };
    let mut result = 1.0;
    let mut i = 0.0;
    while i < r {
        result *= (n - i) / (i + 1.0);
        i += 1.0;
    }
    result.round()
}

/// `n permute r`, same saturating-to-zero domain handling as `ncr`.
fn npr(n: f64, r: f64) -> f64 {
    let n = n.round();
    let r = r.round();
    if r < 0.0 || r > n || n < 0.0 {
        return 0.0;
    }
    let mut result = 1.0;
    let mut i = 0.0;
    while i < r {
        result *= n - i;
        i += 1.0;
    }
    result
}

static CATALOG: Lazy<HashMap<&'static str, CatalogEntry>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("pi", CatalogEntry::Constant(std::f64::consts::PI));
    m.insert("e", CatalogEntry::Constant(std::f64::consts::E));

    m.insert("abs", CatalogEntry::Fn1(f64::abs));
    m.insert("acos", CatalogEntry::Fn1(f64::acos));
    m.insert("asin", CatalogEntry::Fn1(f64::asin));
    m.insert("atan", CatalogEntry::Fn1(f64::atan));
    m.insert("ceil", CatalogEntry::Fn1(f64::ceil));
    m.insert("cos", CatalogEntry::Fn1(f64::cos));
    m.insert("cosh", CatalogEntry::Fn1(f64::cosh));
    m.insert("exp", CatalogEntry::Fn1(f64::exp));
    m.insert("floor", CatalogEntry::Fn1(f64::floor));
    m.insert("ln", CatalogEntry::Fn1(f64::ln));
    m.insert("log", CatalogEntry::Fn1(f64::log10));
    m.insert("sin", CatalogEntry::Fn1(f64::sin));
    m.insert("sinh", CatalogEntry::Fn1(f64::sinh));
    m.insert("sqrt", CatalogEntry::Fn1(f64::sqrt));
    m.insert("tan", CatalogEntry::Fn1(f64::tan));
    m.insert("tanh", CatalogEntry::Fn1(f64::tanh));

    m.insert("atan2", CatalogEntry::Fn2(f64::atan2));
    m.insert("pow", CatalogEntry::Fn2(f64::powf));
    m.insert("fmod", CatalogEntry::Fn2(|a, b| a % b));
    m.insert("ncr", CatalogEntry::Fn2(ncr));
    m.insert("npr", CatalogEntry::Fn2(npr));

    m
});

/// Look up a name in the fixed catalog. Returns `None` for anything not in
/// the table above — callers fall back to the user-variable table before
/// concluding the identifier is unresolvable.
pub fn lookup(name: &str) -> Option<CatalogEntry> {
    CATALOG.get(name).copied()
}
