pub mod demangle;
pub mod nm;

pub use demangle::{CxxFiltDemangler, Demangler, IdentityDemangler};
pub use nm::{NmLister, SymbolLister};
