mod product;
pub use product::{cross, cross_padded, intersection, minus, union, ProductIndex};

mod subset;
pub use subset::{determinize, StateSet};

mod quotient;
pub use quotient::quotient;
