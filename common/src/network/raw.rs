/// Interface attributes exactly as the host (or a substitute source) reports them.
///
/// Nothing here is validated. Attributes the source could not read are
/// `None`; that is never an error at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInterfaceFacts {
    pub name: String,
    pub index: u32,
    /// Operational state string, e.g. `up`, `down`, `unknown`.
    pub oper_state: Option<String>,
    pub mac: Option<String>,
    pub mtu: Option<u32>,
    /// Link speed in Mbps. Kernels report `-1` when the link cannot tell.
    pub speed: Option<i64>,
    pub duplex: Option<String>,
    pub driver: Option<String>,
    pub flags: u32,
    pub wireless: bool,
    /// Backed by a bus device (PCI, USB, ...) rather than created in software.
    pub has_device: bool,
    /// IPv4 and IPv6 assignments mixed, as `addr` or `addr/prefix`.
    pub addresses: Vec<String>,
}

impl RawInterfaceFacts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
