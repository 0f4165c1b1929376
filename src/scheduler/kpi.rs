//! Timetable statistics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Teacher workload | Distinct (day, slot) pairs a teacher is busy |
//! | Lab usage | Batch-slots hosted per lab |
//! | Free slots | Unoccupied slots per division |
//! | Utilization | Occupied / available slots per division |

use std::collections::HashMap;

use crate::models::calendar::slots_per_week;
use crate::models::{Division, ProblemModel, SessionType, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Busy slots per teacher id.
    pub teacher_workload: HashMap<String, usize>,
    /// Batch-slots per lab name.
    pub lab_usage: HashMap<String, usize>,
    /// Theory slots per division (indexed by division).
    pub theory_slots: [usize; 2],
    /// Practical sessions per division.
    pub practical_sessions: [usize; 2],
    /// Free slots per division.
    pub free_slots: [usize; 2],
    /// Schedulable slots per division per week.
    pub total_slots_per_division: usize,
}

impl TimetableKpi {
    /// Computes statistics of a decoded timetable.
    ///
    /// Every teacher and lab of `problem` is listed, idle ones with 0.
    pub fn calculate(timetable: &Timetable, problem: &ProblemModel) -> Self {
        let mut teacher_workload: HashMap<String, usize> = problem
            .teachers()
            .iter()
            .map(|t| (t.id.clone(), 0))
            .collect();
        let mut lab_usage: HashMap<String, usize> =
            problem.labs().iter().map(|l| (l.name.clone(), 0)).collect();
        let mut theory_slots = [0; 2];
        let mut practical_sessions = [0; 2];

        let mut busy = std::collections::HashSet::new();
        for (day, slot, division, activity) in timetable.iter() {
            if busy.insert((activity.teacher_id.as_str(), day, slot)) {
                *teacher_workload.entry(activity.teacher_id.clone()).or_insert(0) += 1;
            }
            match activity.session_type {
                SessionType::Theory => theory_slots[division.index()] += 1,
                SessionType::Practical => {
                    practical_sessions[division.index()] += 1;
                    for placement in &activity.batches {
                        *lab_usage.entry(placement.lab.clone()).or_insert(0) += 1;
                    }
                }
            }
        }

        let total = slots_per_week();
        let free_slots = Division::ALL.map(|d| timetable.free_slots(d));

        Self {
            teacher_workload,
            lab_usage,
            theory_slots,
            practical_sessions,
            free_slots,
            total_slots_per_division: total,
        }
    }

    /// Fraction of a division's week that is occupied (0.0..1.0).
    pub fn utilization(&self, division: Division) -> f64 {
        if self.total_slots_per_division == 0 {
            return 0.0;
        }
        let used = self.total_slots_per_division - self.free_slots[division.index()];
        used as f64 / self.total_slots_per_division as f64
    }

    /// Heaviest teacher workload.
    pub fn max_teacher_workload(&self) -> usize {
        self.teacher_workload.values().copied().max().unwrap_or(0)
    }
}
