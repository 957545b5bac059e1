use super::traits::DataFile;
use crate::core::dynamics::metabolism::MetabolicState;
use crate::core::dynamics::snapshot::{PhaseDistribution, PopulationSnapshot};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Flat CSV row; optional readouts become empty cells.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRow {
    time: f64,
    total: u64,
    viable: u64,
    viability: f64,
    atp: Option<f64>,
    glucose: Option<f64>,
    oxygen: Option<f64>,
    lactate: Option<f64>,
    g1: Option<u64>,
    s: Option<u64>,
    g2: Option<u64>,
    m: Option<u64>,
}

impl From<&PopulationSnapshot> for SnapshotRow {
    fn from(snapshot: &PopulationSnapshot) -> Self {
        let metabolism = snapshot.metabolism;
        let phases = snapshot.phases;
        Self {
            time: snapshot.time,
            total: snapshot.total,
            viable: snapshot.viable,
            viability: snapshot.viability,
            atp: metabolism.map(|m| m.atp),
            glucose: metabolism.map(|m| m.glucose),
            oxygen: metabolism.map(|m| m.oxygen),
            lactate: metabolism.map(|m| m.lactate),
            g1: phases.map(|p| p.g1),
            s: phases.map(|p| p.s),
            g2: phases.map(|p| p.g2),
            m: phases.map(|p| p.m),
        }
    }
}

impl From<SnapshotRow> for PopulationSnapshot {
    fn from(row: SnapshotRow) -> Self {
        let metabolism = match (row.atp, row.glucose, row.oxygen, row.lactate) {
            (Some(atp), Some(glucose), Some(oxygen), Some(lactate)) => Some(MetabolicState {
                atp,
                glucose,
                oxygen,
                lactate,
            }),
            _ => None,
        };
        let phases = match (row.g1, row.s, row.g2, row.m) {
            (Some(g1), Some(s), Some(g2), Some(m)) => Some(PhaseDistribution { g1, s, g2, m }),
            _ => None,
        };
        Self {
            time: row.time,
            total: row.total,
            viable: row.viable,
            viability: row.viability,
            metabolism,
            phases,
        }
    }
}

/// Snapshot time series as CSV with one header row.
pub struct SnapshotCsv;

impl DataFile for SnapshotCsv {
    type Record = Vec<PopulationSnapshot>;
    type Error = csv::Error;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<PopulationSnapshot>, csv::Error> {
        csv::Reader::from_reader(reader)
            .deserialize::<SnapshotRow>()
            .map(|row| row.map(PopulationSnapshot::from))
            .collect()
    }

    fn write_to(snapshots: &Vec<PopulationSnapshot>, writer: &mut impl Write) -> Result<(), csv::Error> {
        write_snapshots_csv(snapshots, writer)
    }
}

/// Streams snapshots as CSV rows into `writer`.
pub fn write_snapshots_csv<W: Write>(
    snapshots: &[PopulationSnapshot],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in snapshots {
        csv_writer.serialize(SnapshotRow::from(snapshot))?;
    }
    csv_writer.flush()?;
    Ok(())
}
