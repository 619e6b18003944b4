//! Managed-object classes and attribute names read by the report

/// Bridge domain definitions deployed on the leaf
pub const BD_DEF: &str = "fvBDDef";
/// EPG deployment records, linking an EPG to its BD
pub const EP_P: &str = "fvEpP";
/// Interface/VLAN connections programmed for an EPG (static or dynamic paths)
pub const IF_CONN: &str = "fvIfConn";

/// `fvBDDef`: DN of the bridge domain
pub const ATTR_BD_DN: &str = "bdDn";
/// `fvBDDef`: multi-destination flood action
pub const ATTR_FLOOD_ACTION: &str = "multiDstPktAct";
/// `fvEpP`: compound reference to the BD, e.g. `uni/bd-[<bd dn>]-isSvc-no`
pub const ATTR_BD_REF: &str = "bdDefDn";
/// `fvEpP`: DN of the EPG itself
pub const ATTR_EPG_KEY: &str = "epgPKey";
/// `fvIfConn`: own DN, embedding the EPG DN in its first bracket pair
pub const ATTR_DN: &str = "dn";
/// `aaaLogin`: session token
pub const ATTR_TOKEN: &str = "token";
