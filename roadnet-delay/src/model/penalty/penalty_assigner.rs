use super::{DriveThroughTimes, ElementTypeCodes, PenaltyError, PenaltyRow, PenaltyRule, PenaltyTable};
use crate::{
    config::{ColumnNames, DelayToolConfiguration},
    model::network::{AttributeBag, LinkRecord},
};
use itertools::Itertools;
use kdam::{tqdm, Bar, BarExt};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// writes rush hour, midday and all day travel times onto link records.
/// the penalty table and element codes are fixed at construction.
#[derive(Debug, Clone)]
pub struct PenaltyAssigner {
    table: PenaltyTable,
    codes: ElementTypeCodes,
    columns: ColumnNames,
}

impl PenaltyAssigner {
    pub fn new(table: PenaltyTable, codes: ElementTypeCodes, columns: ColumnNames) -> PenaltyAssigner {
        PenaltyAssigner {
            table,
            codes,
            columns,
        }
    }

    /// computes the travel times for one row. rows without a free flow time
    /// have no travel times.
    pub fn times_for_row(
        &self,
        row: &PenaltyRow,
    ) -> Result<Option<(PenaltyRule, DriveThroughTimes)>, PenaltyError> {
        let free_flow = match row.free_flow {
            None => return Ok(None),
            Some(f) if f.is_finite() => f,
            Some(f) => {
                return Err(PenaltyError::PenaltyRuleUnmatched(format!(
                    "free flow time must be finite, found {f}"
                )))
            }
        };
        let (rule, bucket) = PenaltyRule::classify(row, &self.codes)?;
        let times = rule.apply(free_flow, bucket, &self.table)?;
        Ok(Some((rule, times)))
    }

    /// reads a row from the attributes, assigns its travel times in place and
    /// returns the rule that fired. the three output columns are null when
    /// the row has no free flow time.
    pub fn assign(&self, attributes: &mut AttributeBag) -> Result<Option<PenaltyRule>, PenaltyError> {
        let row = PenaltyRow::from_attributes(attributes, &self.columns)?;
        let result = self.times_for_row(&row)?;
        let times = result.map(|(_, t)| t);
        attributes.set_f64(&self.columns.rush_hour_time, times.map(|t| t.rush_hour));
        attributes.set_f64(&self.columns.midday_time, times.map(|t| t.midday));
        attributes.set_f64(&self.columns.all_day_time, times.map(|t| t.all_day));
        Ok(result.map(|(rule, _)| rule))
    }

    /// assigns travel times to every record. rows are independent, so when
    /// `parallelize` is set they are processed on the rayon thread pool.
    pub fn assign_all(&self, records: &mut [LinkRecord], parallelize: bool) -> Result<(), PenaltyError> {
        let n_records = records.len();
        let rules = if parallelize {
            let bar = Arc::new(Mutex::new(
                Bar::builder()
                    .desc("assign intersection penalties")
                    .total(n_records)
                    .build()
                    .map_err(PenaltyError::InternalError)?,
            ));
            records
                .par_iter_mut()
                .map(|record| {
                    if let Ok(mut bar) = bar.clone().lock() {
                        let _ = bar.update(1);
                    }
                    self.assign(&mut record.attributes)
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            tqdm!(
                records.iter_mut(),
                desc = "assign intersection penalties",
                total = n_records
            )
            .map(|record| self.assign(&mut record.attributes))
            .collect::<Result<Vec<_>, _>>()?
        };
        let mut counts: HashMap<String, usize> = HashMap::new();
        for rule in rules.into_iter() {
            let key = rule
                .map(|r| r.to_string())
                .unwrap_or_else(|| String::from("no_free_flow_time"));
            *counts.entry(key).or_default() += 1;
        }
        let summary = counts
            .iter()
            .sorted()
            .map(|(rule, count)| format!("{rule}={count}"))
            .join(", ");
        log::info!("assigned penalties to {n_records} records: {summary}");
        Ok(())
    }
}

impl From<&DelayToolConfiguration> for PenaltyAssigner {
    fn from(conf: &DelayToolConfiguration) -> Self {
        PenaltyAssigner::new(conf.penalties, conf.element_codes, conf.columns.clone())
    }
}
