// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

use crate::{ErrorKind, SysnetError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Route destination: the `default` sentinel is distinct from any CIDR,
/// including `0.0.0.0/0`.
pub enum RouteDestination {
    Default,
    Cidr(IpNet),
}

impl std::fmt::Display for RouteDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Cidr(net) => write!(f, "{net}"),
        }
    }
}

impl FromStr for RouteDestination {
    type Err = SysnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "default" {
            Ok(Self::Default)
        } else if s.contains('/') {
            Ok(Self::Cidr(IpNet::from_str(s)?))
        } else {
            // Bare host destination, prefix is the full address length
            let ip = IpAddr::from_str(s)?;
            let prefix = if ip.is_ipv4() { 32 } else { 128 };
            IpNet::new(ip, prefix).map(Self::Cidr).map_err(|e| {
                SysnetError::new(
                    ErrorKind::InvalidArgument,
                    format!("Invalid route destination {s}: {e}"),
                )
            })
        }
    }
}

impl Serialize for RouteDestination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RouteDestination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Route {
    pub destination: RouteDestination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<IpAddr>,
    /// Owning device name. A route with no interface lands in the global
    /// routes file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<u32>,
    /// Extra columns of the routes file, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl Route {
    pub fn new(destination: RouteDestination) -> Self {
        Self {
            destination,
            gateway: None,
            iface: None,
            metric: None,
            options: None,
        }
    }

    pub fn new_default(gateway: IpAddr) -> Self {
        Self {
            gateway: Some(gateway),
            ..Self::new(RouteDestination::Default)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
/// Ordered route table. Merging applies value-equality dedup, the routes
/// file and a stray ifroute copy of the same route collapse to one entry.
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
    }

    pub fn merge(&mut self, routes: Vec<Route>) {
        for route in routes {
            self.push(route);
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
/// Routing configuration: route tables plus kernel forwarding flags.
pub struct Routing {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<RoutingTable>,
    pub forward_ipv4: bool,
    pub forward_ipv6: bool,
}

impl Routing {
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes of all tables, in table order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.tables.iter().flat_map(|t| t.routes().iter())
    }

    pub fn routes_mut(&mut self) -> impl Iterator<Item = &mut Route> {
        self.tables.iter_mut().flat_map(|t| t.routes_mut().iter_mut())
    }

    /// The main (first) table, created on demand.
    pub fn main_table_mut(&mut self) -> &mut RoutingTable {
        if self.tables.is_empty() {
            self.tables.push(RoutingTable::new());
        }
        &mut self.tables[0]
    }
}
