use crate::{
    error::Result,
    include_options,
    models::{addresses, Address},
    options::IncludeOptions,
};

include_options!(
    /// Includes reachable from an address.
    pub struct AddressIncludes(Address);
);

impl AddressIncludes {
    pub fn with_country(self) -> Result<Self> {
        self.add_include(addresses::COUNTRY)
    }
}
