//! Built-in asset catalog, grouped the way the library panel shows it.

use super::factory_graph::Asset;

struct Entry {
	id: &'static str,
	name: &'static str,
	kind: &'static str,
	icon: &'static str,
}

const fn entry(id: &'static str, name: &'static str, kind: &'static str, icon: &'static str) -> Entry {
	Entry { id, name, kind, icon }
}

const GROUPS: &[(&str, &[Entry])] = &[
	(
		"Storage & Tanks",
		&[
			entry("weighbridge", "Weighbridge", "storage", "Scale"),
			entry("labsa-tank-1", "Labsa Tank 1", "tank", "Container"),
			entry("labsa-tank-2", "Labsa Tank 2", "tank", "Container"),
			entry("labsa-tank-3", "Labsa Tank 3", "tank", "Container"),
			entry("caustic-tank-1", "Caustic Tank 1", "tank", "Container"),
			entry("caustic-tank-2", "Caustic Tank 2", "tank", "Container"),
			entry("cp5-tank-1", "CP5 Tank 1", "tank", "Container"),
			entry("cp5-tank-2", "CP5 Tank 2", "tank", "Container"),
			entry("cp5-tank-3", "CP5 Tank 3", "tank", "Container"),
		],
	),
	(
		"Silos",
		&[
			entry("pvd-salt-silo-1", "PVD Salt Silo 1", "silo", "Cylinder"),
			entry("pvd-salt-silo-2", "PVD Salt Silo 2", "silo", "Cylinder"),
			entry("scmc-silo-1", "SCMC Silo 1", "silo", "Cylinder"),
			entry("scmc-silo-2", "SCMC Silo 2", "silo", "Cylinder"),
			entry("soda-ash-light-tank-1", "Soda Ash Light Tank 1", "tank", "Container"),
		],
	),
	(
		"BatchPots - Unit 1",
		&[
			entry("labsa-batchpot-u1", "Labsa BatchPot U1", "batchpot", "Beaker"),
			entry("caustic-batchpot-u1", "Caustic BatchPot U1", "batchpot", "Beaker"),
			entry("cp5-batchpot-u1", "CP5 BatchPot U1", "batchpot", "Beaker"),
			entry("silicate-batchpot-u1", "Silicate BatchPot U1", "batchpot", "Beaker"),
			entry("water-batchpot-u1", "Water BatchPot U1", "batchpot", "Beaker"),
			entry("soda-ash-light-batchpot-u1", "Soda Ash Light BatchPot U1", "batchpot", "Beaker"),
		],
	),
	(
		"BatchPots - Unit 2",
		&[
			entry("labsa-batchpot-u2", "Labsa BatchPot U2", "batchpot", "Beaker"),
			entry("caustic-batchpot-u2", "Caustic BatchPot U2", "batchpot", "Beaker"),
			entry("cp5-batchpot-u2", "CP5 BatchPot U2", "batchpot", "Beaker"),
			entry("silicate-batchpot-u2", "Silicate BatchPot U2", "batchpot", "Beaker"),
			entry("water-batchpot-u2", "Water BatchPot U2", "batchpot", "Beaker"),
			entry("carbomil-soda-batchpot-u2", "Carbomil Soda Batch Pot U2", "batchpot", "Beaker"),
		],
	),
	(
		"Hoppers",
		&[
			entry("scmc-way-hopper-u1", "SCMC Way Hopper U1", "hopper", "Cone"),
			entry("scmc-way-hopper-u2", "SCMC Way Hopper U2", "hopper", "Cone"),
			entry("pvd-salt-way-hopper-u1", "PVD Salt Way Hopper U1", "hopper", "Cone"),
			entry("pvd-salt-way-hopper-u2", "PVD Salt Way Hopper U2", "hopper", "Cone"),
			entry("db100-way-hopper-u2", "DB100 Way Hopper U2", "hopper", "Cone"),
			entry("rework-way-hopper-u2", "Rework Way Hopper U2", "hopper", "Cone"),
			entry("base-powder-way-hopper-u1", "Base Powder Way Hopper U1", "hopper", "Cone"),
		],
	),
	(
		"Processing",
		&[
			entry("slurry-mixer-u1", "Slurry Mixer U1", "mixer", "Blend"),
			entry("slurry-mixer-u2", "Slurry Mixer U2", "mixer", "Blend"),
			entry("slurry-holding-tank-u1", "Slurry Holding Tank U1", "tank", "Container"),
			entry("slurry-holding-tank-u2", "Slurry Holding Tank U2", "tank", "Container"),
		],
	),
	(
		"Measurement",
		&[
			entry("flow-meter-u1", "Flow Meter U1", "meter", "Gauge"),
			entry("flow-meter-u2", "Flow Meter U2", "meter", "Gauge"),
			entry("moisture-qty-1", "Moisture Qty 1", "sensor", "Droplet"),
			entry("moisture-qty-2", "Moisture Qty 2", "sensor", "Droplet"),
		],
	),
];

fn to_asset(group: &str, e: &Entry) -> Asset {
	Asset {
		id: e.id.to_string(),
		name: e.name.to_string(),
		kind: e.kind.to_string(),
		group: group.to_string(),
		icon: e.icon.to_string(),
		zone: None,
		zone_in_out: None,
		tags: Vec::new(),
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetGroup {
	pub name: String,
	pub assets: Vec<Asset>,
}

pub fn groups() -> Vec<AssetGroup> {
	GROUPS
		.iter()
		.map(|(name, entries)| AssetGroup {
			name: name.to_string(),
			assets: entries.iter().map(|e| to_asset(name, e)).collect(),
		})
		.collect()
}

pub fn group_names() -> Vec<String> {
	GROUPS.iter().map(|(name, _)| name.to_string()).collect()
}

pub fn all_assets() -> Vec<Asset> {
	groups().into_iter().flat_map(|g| g.assets).collect()
}

pub fn find(id: &str) -> Option<Asset> {
	GROUPS.iter().find_map(|(group, entries)| {
		entries.iter().find(|e| e.id == id).map(|e| to_asset(group, e))
	})
}

fn matches(asset: &Asset, query: &str) -> bool {
	asset.name.to_lowercase().contains(&query.trim().to_lowercase())
}

/// Groups whose assets match `query` by name; empty groups are dropped.
pub fn filter_groups(query: &str) -> Vec<AssetGroup> {
	groups()
		.into_iter()
		.filter_map(|mut g| {
			g.assets.retain(|a| matches(a, query));
			(!g.assets.is_empty()).then_some(g)
		})
		.collect()
}

/// Assets not yet placed whose names match `query`.
pub fn available(query: &str, is_used: impl Fn(&str) -> bool) -> Vec<Asset> {
	all_assets()
		.into_iter()
		.filter(|a| !is_used(&a.id) && matches(a, query))
		.collect()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn catalog_ids_are_unique() {
		let assets = all_assets();
		let ids: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
		assert_eq!(ids.len(), assets.len());
		assert_eq!(assets.len(), 41);
	}

	#[test]
	fn lookup_carries_group_and_type() {
		let meter = find("flow-meter-u1").unwrap();
		assert_eq!(meter.group, "Measurement");
		assert_eq!(meter.kind, "meter");
		assert!(find("nope").is_none());
	}

	#[test]
	fn search_is_case_insensitive_and_drops_empty_groups() {
		let groups = filter_groups("  BATCHPOT u2");
		assert_eq!(groups.len(), 1);
		assert_eq!(groups[0].name, "BatchPots - Unit 2");
		assert_eq!(groups[0].assets.len(), 5);

		assert_eq!(filter_groups("").len(), group_names().len());
		assert!(filter_groups("zzz").is_empty());
	}

	#[test]
	fn available_skips_used_assets() {
		let meters = available("flow meter", |id| id == "flow-meter-u1");
		let ids: Vec<&str> = meters.iter().map(|a| a.id.as_str()).collect();
		assert_eq!(ids, vec!["flow-meter-u2"]);
	}
}
