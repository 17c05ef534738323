// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;

use crate::{
    handler, BootProto, ConnectionConfig, IfcfgFile, InterfaceType, IpConfig,
    StartMode, SysnetError,
};

/// Parse one loaded ifcfg file into a connection config.
///
/// The type is taken from the caller when given, otherwise sniffed from
/// the file. A type without a handler yields `Ok(None)`: hardware we do
/// not understand must not abort the whole configuration read.
pub(crate) fn read_connection(
    name: &str,
    iface_type: Option<InterfaceType>,
    file: &IfcfgFile,
) -> Result<Option<ConnectionConfig>, SysnetError> {
    let iface_type = iface_type.unwrap_or_else(|| file.iface_type());
    let Some(handler) = handler::for_type(&iface_type) else {
        log::info!(
            "Skipping connection {name}: no support for type {iface_type}"
        );
        return Ok(None);
    };

    let mut conn = ConnectionConfig::new(name);

    if let Some(raw) = file.get_str("BOOTPROTO") {
        match BootProto::from_sysconfig(raw) {
            Some(proto) => conn.bootproto = proto,
            None => {
                log::warn!("Unknown BOOTPROTO {raw} of {name}, using static")
            }
        }
    }
    if let Some(raw) = file.get_str("STARTMODE") {
        match StartMode::from_sysconfig(raw) {
            Some(mode) => conn.startmode = mode,
            None => {
                log::warn!("Unknown STARTMODE {raw} of {name}, using manual");
                conn.startmode = StartMode::Manual;
            }
        }
    } else {
        conn.startmode = StartMode::Manual;
    }
    conn.ifplugd_priority = read_u32(file, "IFPLUGD_PRIORITY", name);
    conn.description = file.get_str("NAME").map(|s| s.to_string());
    conn.mtu = read_u32(file, "MTU", name);
    conn.ethtool_options =
        file.get_str("ETHTOOL_OPTIONS").map(|s| s.to_string());
    conn.firewall_zone = file.get_str("ZONE").map(|s| s.to_string());
    conn.dhclient_set_hostname =
        file.get_str("DHCLIENT_SET_HOSTNAME").map(|v| v == "yes");
    conn.ip = read_ip_configs(name, file);
    conn.extra = handler.read_extra(file)?;
    Ok(Some(conn))
}

/// Loaded integers are i64 while the model fields are narrower. A value
/// out of range is logged and treated as unset, never wrapped.
fn read_u32(file: &IfcfgFile, var: &str, name: &str) -> Option<u32> {
    let value = file.get_int(var)?;
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring out of range {var}={value} of {name}");
            None
        }
    }
}

fn read_ip_configs(name: &str, file: &IfcfgFile) -> Vec<IpConfig> {
    let mut ret = Vec::new();
    let Some(addrs) = file.values("IPADDR") else {
        return ret;
    };
    for (suffix, value) in addrs {
        let Some(raw) = value.as_str() else {
            continue;
        };
        let Some(address) = parse_address(file, suffix, raw) else {
            log::warn!("Ignoring invalid IPADDR{suffix}={raw} of {name}");
            continue;
        };
        let mut ip = IpConfig::new(suffix, address);
        ip.label = lookup_str(file, "LABEL", suffix);
        ip.remote_address = lookup_str(file, "REMOTE_IPADDR", suffix)
            .and_then(|r| parse_plain_or_cidr(&r));
        ip.broadcast = file
            .values("BROADCAST")
            .and_then(|vals| vals.get(suffix))
            .and_then(|v| v.as_ip());
        ret.push(ip);
    }
    ret
}

fn lookup_str(
    file: &IfcfgFile,
    var: &str,
    suffix: &str,
) -> Option<String> {
    file.values(var)
        .and_then(|vals| vals.get(suffix))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// `IPADDR` may carry the prefix itself, or lean on `PREFIXLEN`/`NETMASK`
/// under the same suffix. A bare address gets the full-length prefix.
fn parse_address(
    file: &IfcfgFile,
    suffix: &str,
    raw: &str,
) -> Option<IpNet> {
    if raw.contains('/') {
        return IpNet::from_str(raw).ok();
    }
    let ip = IpAddr::from_str(raw).ok()?;
    let prefix = if let Some(len) = file
        .values("PREFIXLEN")
        .and_then(|vals| vals.get(suffix))
        .and_then(|v| v.as_int())
    {
        u8::try_from(len).ok()?
    } else if let Some(mask) = lookup_str(file, "NETMASK", suffix)
        .and_then(|m| IpAddr::from_str(&m).ok())
    {
        ipnet::ip_mask_to_prefix(mask).ok()?
    } else if ip.is_ipv4() {
        32
    } else {
        128
    };
    IpNet::new(ip, prefix).ok()
}

fn parse_plain_or_cidr(raw: &str) -> Option<IpNet> {
    if raw.contains('/') {
        IpNet::from_str(raw).ok()
    } else {
        let ip = IpAddr::from_str(raw).ok()?;
        let prefix = if ip.is_ipv4() { 32 } else { 128 };
        IpNet::new(ip, prefix).ok()
    }
}
