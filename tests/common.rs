#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rrunlogger::models::record::RunDetails;
use rrunlogger::models::reference::{ReferenceData, ReferenceKind, ReferenceList};
use std::fs;
use std::path::{Path, PathBuf};

pub fn rrl() -> Command {
    cargo_bin_cmd!("rrunlogger")
}

/// Fixed ledger day used across tests (stamp "03-09-26").
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
}

pub fn sample_refs() -> ReferenceData {
    ReferenceData::new(
        ReferenceList::new(ReferenceKind::Operator, ["Jane", "Bob"]),
        ReferenceList::new(ReferenceKind::Machine, ["M1", "M2"]),
        ReferenceList::new(ReferenceKind::Item, ["I1", "I2"]),
    )
}

/// The canonical "Jane" record: all required fields, optional ones empty.
pub fn jane_details() -> RunDetails {
    RunDetails {
        machine: "M1".into(),
        item: "I1".into(),
        setup_time: "5".into(),
        machine_cycle_time: "2".into(),
        parts_per_cycle: "1".into(),
        total_quantity: "10".into(),
        job_time: "20".into(),
        operation_number: "10".into(),
        ..Default::default()
    }
}

pub fn details_with_setup(setup: &str) -> RunDetails {
    RunDetails {
        setup_time: setup.into(),
        ..jane_details()
    }
}

/// Form token the HTTP tests install on the router state.
pub const FORM_TOKEN: &str = "t0k3n";

/// Urlencoded body for the Jane record, token included.
pub const JANE_FORM: &str = "machine=M1&item=I1&setup_time=5&machine_cycle_time=2&parts_per_cycle=1\
&total_quantity=10&job_time=20&operation_number=10&notes=&start_time=&end_time=&csrf_token=t0k3n";

/// Write operator/machine/item CSV lookup files into `dir`.
pub fn write_reference_files(dir: &Path) {
    fs::write(dir.join("operator_list.csv"), "Operator,Shift\nJane,A\nBob,B\n").unwrap();
    fs::write(dir.join("machine_list.csv"), "Machine\nM1\nM2\n").unwrap();
    fs::write(dir.join("item_list.csv"), "Item,Description\nI1,Bracket\nI2,Flange\n").unwrap();
}

/// Config file pointing every path into `dir`.
pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("rrunlogger.conf");
    let yaml = format!(
        "data_dir: {d}\noperator_list: {d}/operator_list.csv\nmachine_list: {d}/machine_list.csv\n\
item_list: {d}/item_list.csv\nhost: 127.0.0.1\nport: 5002\nlog_filter: warn\n",
        d = dir.display()
    );
    fs::write(&path, yaml).unwrap();
    path
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
