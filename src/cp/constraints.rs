//! Constraint emission for the seven rule families.
//!
//! Besides the indexed unit variables, emission creates auxiliary
//! indicators per (day, slot):
//!
//! - one batch indicator per (division, practical subject, batch), true
//!   iff the batch sits in any lab;
//! - one session indicator per (division, practical subject), true iff
//!   any batch sits in any lab;
//! - has-theory and has-practical indicators per division.
//!
//! Every indicator is bound in both directions with
//! [`ConstraintModel::bind_or`], so it can never float free of the
//! units it summarizes.
//!
//! A practical session is one *activity unit*, like a theory variable.
//! Slot exclusivity and teacher conflict count activity units, not
//! (batch, lab) variables: three batches in three labs are one session.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::engine::{unit_terms, Comparison, ConstraintModel, Literal};
use crate::models::calendar::rest_pairs;
use crate::models::{Batch, Day, Division, LabId, ProblemModel, RuleFamily, Slot, SubjectId};

use super::variables::VariableIndex;

/// Number of constraints emitted per rule family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionReport {
    counts: [usize; 7],
    /// Auxiliary indicator variables created during emission.
    pub auxiliary_vars: usize,
}

impl EmissionReport {
    /// Constraints emitted for `family`.
    pub fn count(&self, family: RuleFamily) -> usize {
        self.counts[family.index()]
    }

    /// Constraints emitted in total.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn record(&mut self, family: RuleFamily, n: usize) {
        self.counts[family.index()] += n;
    }
}

impl fmt::Display for EmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = RuleFamily::ALL
            .iter()
            .map(|fam| format!("{}={}", fam, self.count(*fam)))
            .collect();
        write!(f, "{} constraints [{}]", self.total(), parts.join(", "))
    }
}

/// Per-(day, slot, division) literals collected while emitting.
#[derive(Default)]
struct CellUnits {
    theory: Vec<(SubjectId, Literal)>,
    sessions: Vec<(SubjectId, Literal)>,
}

/// Emits the full constraint set for a problem.
pub struct ConstraintBuilder<'a> {
    problem: &'a ProblemModel,
    index: &'a VariableIndex,
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(problem: &'a ProblemModel, index: &'a VariableIndex) -> Self {
        Self { problem, index }
    }

    /// Emits every rule family into `model`.
    ///
    /// The index must come from a [`super::VariableFactory`] run on the
    /// same problem; units missing from it are skipped.
    pub fn emit(&self, model: &mut ConstraintModel) -> EmissionReport {
        let mut report = EmissionReport::default();
        let vars_before = model.var_count();
        let constraints_before = model.constraint_count();

        // (division, subject) -> weekly literals, for minimum load
        let mut weekly_theory: HashMap<(Division, SubjectId), Vec<Literal>> = HashMap::new();
        let mut weekly_sessions: HashMap<(Division, SubjectId), Vec<Literal>> = HashMap::new();

        for day in Day::ALL {
            for slot in Slot::all() {
                let mut cells: [CellUnits; 2] = Default::default();

                for division in Division::ALL {
                    let cell = &mut cells[division.index()];
                    self.emit_cell(model, &mut report, day, slot, division, cell);

                    for &(subject, lit) in &cell.theory {
                        weekly_theory.entry((division, subject)).or_default().push(lit);
                    }
                    for &(subject, lit) in &cell.sessions {
                        weekly_sessions.entry((division, subject)).or_default().push(lit);
                    }
                }

                self.emit_mutual_exclusion(model, &mut report, day, slot, &cells);
                self.emit_lab_capacity(model, &mut report, day, slot);
                self.emit_teacher_conflict(model, &mut report, day, slot, &cells);
            }
        }

        self.emit_minimum_load(model, &mut report, &weekly_theory, &weekly_sessions);
        self.emit_teacher_rest(model, &mut report);

        report.auxiliary_vars = model.var_count() - vars_before;
        debug_assert_eq!(report.total(), model.constraint_count() - constraints_before);
        debug!("emitted {}", report);
        report
    }

    /// Batch atomicity, session indicators, and slot exclusivity for one
    /// (day, slot, division).
    fn emit_cell(
        &self,
        model: &mut ConstraintModel,
        report: &mut EmissionReport,
        day: Day,
        slot: Slot,
        division: Division,
        cell: &mut CellUnits,
    ) {
        for subject in self.problem.subject_ids() {
            if let Some(var) = self.index.theory(day, slot, division, subject) {
                cell.theory.push((subject, var.lit()));
            }
        }

        for subject in self.problem.practical_subjects() {
            let labs = self.problem.preferred_labs(subject);
            let mut all_units = Vec::new();
            let mut batch_indicators = Vec::with_capacity(Batch::ALL.len());

            for batch in Batch::ALL {
                let units: Vec<Literal> = labs
                    .iter()
                    .filter_map(|&lab| {
                        self.index
                            .practical(day, slot, division, subject, batch, lab)
                            .map(|v| v.lit())
                    })
                    .collect();
                if units.is_empty() {
                    continue;
                }

                // a batch sits in at most one lab
                if units.len() > 1 {
                    model.add_linear(unit_terms(&units), Comparison::LessOrEqual, 1);
                    report.record(RuleFamily::SlotExclusivity, 1);
                }

                let indicator = model
                    .new_bool_var(format!(
                        "batch_{}_{}_{}_{}_{}",
                        day,
                        slot.index(),
                        division,
                        subject.0,
                        batch
                    ))
                    .lit();
                let before = model.constraint_count();
                model.bind_or(indicator, &units);
                report.record(RuleFamily::BatchAtomicity, model.constraint_count() - before);

                batch_indicators.push(indicator);
                all_units.extend(units);
            }
            if all_units.is_empty() {
                continue;
            }

            for pair in batch_indicators.windows(2) {
                model.add_equality(pair[0], pair[1]);
                report.record(RuleFamily::BatchAtomicity, 1);
            }

            let session = model
                .new_bool_var(format!(
                    "session_{}_{}_{}_{}",
                    day,
                    slot.index(),
                    division,
                    subject.0
                ))
                .lit();
            let before = model.constraint_count();
            model.bind_or(session, &all_units);
            report.record(RuleFamily::MinimumLoad, model.constraint_count() - before);

            cell.sessions.push((subject, session));
        }

        let activity_units: Vec<Literal> = cell
            .theory
            .iter()
            .chain(&cell.sessions)
            .map(|&(_, lit)| lit)
            .collect();
        if activity_units.len() > 1 {
            model.add_linear(unit_terms(&activity_units), Comparison::LessOrEqual, 1);
            report.record(RuleFamily::SlotExclusivity, 1);
        }
    }

    /// A division may run a practical only while the other division is in
    /// theory.
    fn emit_mutual_exclusion(
        &self,
        model: &mut ConstraintModel,
        report: &mut EmissionReport,
        day: Day,
        slot: Slot,
        cells: &[CellUnits; 2],
    ) {
        let before = model.constraint_count();
        let mut has_theory = Vec::with_capacity(2);
        let mut has_practical = Vec::with_capacity(2);

        for division in Division::ALL {
            let cell = &cells[division.index()];
            let theory: Vec<Literal> = cell.theory.iter().map(|&(_, l)| l).collect();
            let sessions: Vec<Literal> = cell.sessions.iter().map(|&(_, l)| l).collect();

            let t = model
                .new_bool_var(format!("has_theory_{}_{}_{}", day, slot.index(), division))
                .lit();
            model.bind_or(t, &theory);
            let p = model
                .new_bool_var(format!("has_practical_{}_{}_{}", day, slot.index(), division))
                .lit();
            model.bind_or(p, &sessions);

            has_theory.push(t);
            has_practical.push(p);
        }

        for division in Division::ALL {
            model.add_implication(
                has_practical[division.index()],
                has_theory[division.other().index()],
            );
        }
        report.record(RuleFamily::MutualExclusion, model.constraint_count() - before);
    }

    /// Each lab holds at most one batch per slot across both divisions.
    fn emit_lab_capacity(
        &self,
        model: &mut ConstraintModel,
        report: &mut EmissionReport,
        day: Day,
        slot: Slot,
    ) {
        let mut per_lab: HashMap<LabId, Vec<Literal>> = HashMap::new();
        for division in Division::ALL {
            for subject in self.problem.practical_subjects() {
                for &lab in self.problem.preferred_labs(subject) {
                    for batch in Batch::ALL {
                        if let Some(var) =
                            self.index.practical(day, slot, division, subject, batch, lab)
                        {
                            per_lab.entry(lab).or_default().push(var.lit());
                        }
                    }
                }
            }
        }

        for lab in self.problem.lab_ids() {
            if let Some(units) = per_lab.get(&lab) {
                if units.len() > 1 {
                    model.add_linear(unit_terms(units), Comparison::LessOrEqual, 1);
                    report.record(RuleFamily::LabCapacity, 1);
                }
            }
        }
    }

    /// Busy indicators and single-activity limit per teacher.
    fn emit_teacher_conflict(
        &self,
        model: &mut ConstraintModel,
        report: &mut EmissionReport,
        day: Day,
        slot: Slot,
        cells: &[CellUnits; 2],
    ) {
        for teacher in self.problem.teacher_ids() {
            let Some(busy) = self.index.busy(day, slot, teacher) else {
                continue;
            };
            let subjects = self.problem.subjects_of(teacher);

            let mut units = Vec::new();
            let mut activity_units = Vec::new();
            for division in Division::ALL {
                let cell = &cells[division.index()];
                for &subject in &subjects {
                    if let Some(var) = self.index.theory(day, slot, division, subject) {
                        units.push(var.lit());
                    }
                    for &lab in self.problem.preferred_labs(subject) {
                        for batch in Batch::ALL {
                            if let Some(var) =
                                self.index.practical(day, slot, division, subject, batch, lab)
                            {
                                units.push(var.lit());
                            }
                        }
                    }
                    activity_units.extend(
                        cell.theory
                            .iter()
                            .chain(&cell.sessions)
                            .filter(|(s, _)| *s == subject)
                            .map(|&(_, l)| l),
                    );
                }
            }

            let before = model.constraint_count();
            model.bind_or(busy.lit(), &units);
            if activity_units.len() > 1 {
                model.add_linear(unit_terms(&activity_units), Comparison::LessOrEqual, 1);
            }
            report.record(RuleFamily::TeacherConflict, model.constraint_count() - before);
        }
    }

    /// Weekly theory slots and practical sessions per (subject, division).
    fn emit_minimum_load(
        &self,
        model: &mut ConstraintModel,
        report: &mut EmissionReport,
        weekly_theory: &HashMap<(Division, SubjectId), Vec<Literal>>,
        weekly_sessions: &HashMap<(Division, SubjectId), Vec<Literal>>,
    ) {
        for subject_id in self.problem.subject_ids() {
            let subject = &self.problem.subjects[subject_id.0];
            for division in Division::ALL {
                if subject.has_theory() {
                    let lits = weekly_theory
                        .get(&(division, subject_id))
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    model.add_linear(
                        unit_terms(lits),
                        Comparison::GreaterOrEqual,
                        i64::from(subject.theory_per_week),
                    );
                    report.record(RuleFamily::MinimumLoad, 1);
                }
                if subject.has_practical() {
                    let lits = weekly_sessions
                        .get(&(division, subject_id))
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    model.add_linear(
                        unit_terms(lits),
                        Comparison::GreaterOrEqual,
                        i64::from(subject.practical_per_week),
                    );
                    report.record(RuleFamily::MinimumLoad, 1);
                }
            }
        }
    }

    /// No teacher is busy in two adjacent slots of a day.
    fn emit_teacher_rest(&self, model: &mut ConstraintModel, report: &mut EmissionReport) {
        let pairs = rest_pairs();
        for day in Day::ALL {
            for teacher in self.problem.teacher_ids() {
                if self.problem.subjects_of(teacher).is_empty() {
                    continue;
                }
                for &(a, b) in &pairs {
                    if let (Some(x), Some(y)) =
                        (self.index.busy(day, a, teacher), self.index.busy(day, b, teacher))
                    {
                        model.add_linear(
                            unit_terms(&[x.lit(), y.lit()]),
                            Comparison::LessOrEqual,
                            1,
                        );
                        report.record(RuleFamily::TeacherRest, 1);
                    }
                }
            }
        }
    }
}
