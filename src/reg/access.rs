/// Register access mode marker.
pub trait RegAccess: Sized + Copy + Default + Send + Sync + 'static {}

/// Access mode that allows reading.
pub trait RAccess: RegAccess {}

/// Access mode that allows writing.
pub trait WAccess: RegAccess {}

/// Read-only access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ro;

impl RegAccess for Ro {}
impl RAccess for Ro {}

/// Write-only access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Wo;

impl RegAccess for Wo {}
impl WAccess for Wo {}

/// Read-write access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rw;

impl RegAccess for Rw {}
impl RAccess for Rw {}
impl WAccess for Rw {}
