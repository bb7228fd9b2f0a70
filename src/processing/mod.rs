pub mod dates;
pub mod reference;

pub use dates::DerivedFieldCalculator;
pub use reference::ReferenceData;
