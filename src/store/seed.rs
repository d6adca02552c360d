//! Seed data for the mock tables. Mirrors the demo dataset the app ships
//! with: two inventory tasks, three registrations, and a small asset base
//! spread over two warehouses and the office.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeZone, Utc};

use super::models::{
    AssetDetails, AssetRecord, AssetType, InventoryItem, InventoryTaskDetail, Location,
    RegistrationDetail, RegistrationItem, RegistrationStatus, TaskStatus, Warehouse,
};
use super::Tables;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

fn details(
    asset_id: &str,
    asset_type: &str,
    asset_name: &str,
    location: &str,
    epc: &str,
) -> AssetDetails {
    AssetDetails {
        id: asset_id.to_string(),
        asset_type: asset_type.to_string(),
        asset_name: asset_name.to_string(),
        location: location.to_string(),
        epc: epc.to_string(),
        barcode: epc.replacen("EPC", "BC", 1),
        unit: "pcs".to_string(),
    }
}

fn registration_item(id: &str, name: &str, required: u32, scanned: u32) -> RegistrationItem {
    RegistrationItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity_required: required,
        quantity_scanned: scanned,
    }
}

fn inventory_item(
    asset: &AssetDetails,
    required: u32,
    scanned: u32,
    expected_epcs: &[&str],
) -> InventoryItem {
    InventoryItem {
        asset_id: asset.id.clone(),
        asset_type: asset.asset_type.clone(),
        asset_name: asset.asset_name.clone(),
        quantity_required: required,
        quantity_scanned: scanned,
        expected_epcs: expected_epcs.iter().map(|e| e.to_string()).collect(),
    }
}

pub(crate) fn tables() -> Tables {
    let desk = details("ASSET-A1", "Desk", "Oak Desk 1.6m", "Warehouse A, Floor 2", "EPC-A1-001");
    let all_details = vec![
        desk.clone(),
        details("ASSET-A1", "Desk", "Oak Desk 1.6m", "Warehouse A, Floor 2", "EPC-A1-002"),
        details("ASSET-B2", "Laptop", "Dell XPS 15", "IT Storage", "EPC-B2-001"),
        details("ASSET-B2", "Laptop", "Dell XPS 15", "IT Storage", "EPC-B2-002"),
        details("ASSET-B2", "Laptop", "Dell XPS 15", "IT Storage", "EPC-B2-003"),
        details("ASSET-C3", "Office Chair", "Ergonomic Pro Chair", "Head Office", "EPC-C3-001"),
        details("ASSET-D4", "Monitor", "LG 27\" Monitor", "Warehouse A, Floor 2", "EPC-D4-001"),
        details("ASSET-E5", "Printer", "HP LaserJet", "Head Office", "EPC-E5-001"),
    ];

    let assets: HashMap<String, AssetRecord> = all_details
        .iter()
        .map(|d| (d.epc.clone(), d.record()))
        .collect();
    let barcode_index: HashMap<String, String> = all_details
        .iter()
        .map(|d| (d.barcode.clone(), d.epc.clone()))
        .collect();
    let asset_details: HashMap<String, AssetDetails> = all_details
        .iter()
        .map(|d| (d.epc.clone(), d.clone()))
        .collect();

    let laptop = &all_details[2];
    let chair = &all_details[5];

    let tasks = HashMap::from([
        (
            "IVT001".to_string(),
            InventoryTaskDetail {
                id: "IVT001".to_string(),
                name: "Q3 IT stocktake".to_string(),
                created_at: at(2024, 9, 1, 9, 0),
                status: TaskStatus::Pending,
                location: "Warehouse A, Floor 2".to_string(),
                items: vec![
                    inventory_item(laptop, 3, 0, &["EPC-B2-001", "EPC-B2-002", "EPC-B2-003"]),
                    inventory_item(&desk, 2, 0, &["EPC-A1-001", "EPC-A1-002"]),
                ],
            },
        ),
        (
            "IVT002".to_string(),
            InventoryTaskDetail {
                id: "IVT002".to_string(),
                name: "Office asset stocktake".to_string(),
                created_at: at(2024, 8, 28, 14, 0),
                status: TaskStatus::Completed,
                location: "Head Office".to_string(),
                items: vec![inventory_item(chair, 1, 1, &["EPC-C3-001"])],
            },
        ),
    ]);

    // What the radio would actually see at each task's location: a subset of
    // the expected tags, two surplus assets and two tags nobody knows.
    let tag_fields = HashMap::from([
        (
            "IVT001".to_string(),
            vec![
                "EPC-B2-001".to_string(),
                "EPC-B2-002".to_string(),
                "EPC-A1-001".to_string(),
                "EPC-D4-001".to_string(),
                "EPC-E5-001".to_string(),
                "UNKNOWN-EPC-001".to_string(),
                "UNKNOWN-EPC-002".to_string(),
            ],
        ),
        ("IVT002".to_string(), vec!["EPC-C3-001".to_string()]),
    ]);

    let declared_epcs: HashSet<String> =
        ["3620100", "3620101", "3620102", "3620155", "3620123"]
            .into_iter()
            .map(String::from)
            .collect();

    // Declaration capture sees the already-declared tags plus four new ones.
    let mut declaration_field: Vec<String> = declared_epcs.iter().cloned().collect();
    declaration_field.sort();
    declaration_field.extend((0..4).map(|i| format!("3008-NEW-{i}")));

    let registrations = HashMap::from([
        (
            "R012345".to_string(),
            RegistrationDetail {
                id: "R012345".to_string(),
                name: "Office furniture declaration".to_string(),
                created_at: at(2025, 8, 30, 10, 30),
                status: RegistrationStatus::Pending,
                created_by: "Minh Tri".to_string(),
                updated_at: at(2025, 8, 30, 11, 0),
                notes: "Declare assets for the new head office".to_string(),
                warehouse_id: Some("WH01".to_string()),
                location_id: Some("LOC01-A".to_string()),
                items: vec![
                    registration_item("item-1", "Wooden Desk", 10, 0),
                    registration_item("item-2", "Adjustable Chair", 10, 0),
                    registration_item("item-3", "Dell Monitor", 5, 0),
                ],
            },
        ),
        (
            "R012346".to_string(),
            RegistrationDetail {
                id: "R012346".to_string(),
                name: "IT equipment for the new warehouse".to_string(),
                created_at: at(2025, 8, 31, 17, 30),
                status: RegistrationStatus::Pending,
                created_by: "Van An".to_string(),
                updated_at: at(2025, 8, 31, 17, 30),
                notes: "Laptops and printers for the satellite warehouse".to_string(),
                warehouse_id: Some("WH02".to_string()),
                location_id: None,
                items: vec![
                    registration_item("item-4", "ThinkPad Laptop", 15, 0),
                    registration_item("item-5", "Canon Printer", 3, 0),
                ],
            },
        ),
        (
            "R012347".to_string(),
            RegistrationDetail {
                id: "R012347".to_string(),
                name: "Meeting room furniture".to_string(),
                created_at: at(2025, 9, 1, 9, 0),
                status: RegistrationStatus::Completed,
                created_by: "Thi Bich".to_string(),
                updated_at: at(2025, 9, 1, 9, 0),
                notes: "Done".to_string(),
                warehouse_id: Some("WH01".to_string()),
                location_id: None,
                items: vec![
                    registration_item("item-6", "Large Meeting Table", 1, 1),
                    registration_item("item-7", "Folding Chair", 8, 8),
                ],
            },
        ),
    ]);

    let warehouses = vec![
        Warehouse { id: "WH01".to_string(), name: "Central Warehouse".to_string() },
        Warehouse { id: "WH02".to_string(), name: "Satellite Warehouse 1".to_string() },
        Warehouse { id: "WH03".to_string(), name: "Returns Warehouse".to_string() },
    ];

    let locations = vec![
        Location { id: "LOC01-A".to_string(), name: "Zone A".to_string(), warehouse_id: "WH01".to_string() },
        Location { id: "LOC01-B".to_string(), name: "Zone B".to_string(), warehouse_id: "WH01".to_string() },
        Location { id: "LOC01-C".to_string(), name: "Zone C".to_string(), warehouse_id: "WH01".to_string() },
        Location { id: "LOC02-A".to_string(), name: "Zone A".to_string(), warehouse_id: "WH02".to_string() },
        Location { id: "LOC02-B".to_string(), name: "Zone B".to_string(), warehouse_id: "WH02".to_string() },
    ];

    let asset_types = vec![
        AssetType { id: "AT01".to_string(), name: "Wooden Desk".to_string() },
        AssetType { id: "AT02".to_string(), name: "Adjustable Chair".to_string() },
        AssetType { id: "AT03".to_string(), name: "Dell Monitor".to_string() },
        AssetType { id: "AT04".to_string(), name: "ThinkPad Laptop".to_string() },
        AssetType { id: "AT05".to_string(), name: "Canon Printer".to_string() },
        AssetType { id: "AT06".to_string(), name: "Large Meeting Table".to_string() },
        AssetType { id: "AT07".to_string(), name: "Folding Chair".to_string() },
    ];

    Tables {
        registrations,
        declared_epcs,
        assets,
        asset_details,
        barcode_index,
        tasks,
        tag_fields,
        declaration_field,
        warehouses,
        locations,
        asset_types,
    }
}
