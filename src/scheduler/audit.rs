//! Independent check of a decoded timetable against the timetabling rules.
//!
//! Works on the [`Timetable`] and the [`ProblemModel`] only, never on
//! solver variables, so it catches encoding mistakes as well as decoding
//! ones. Slot exclusivity holds by construction: a cell stores at most
//! one activity.

use std::collections::{HashMap, HashSet};

use crate::models::calendar::rest_pairs;
use crate::models::{
    cell_label, Batch, Day, Division, ProblemModel, SessionType, Slot, Timetable, Violation,
};

/// Checks every rule and returns all violations found.
///
/// An empty result means the timetable satisfies minimum load, mutual
/// exclusion, lab capacity, teacher non-conflict, teacher rest, and
/// batch atomicity, and agrees with the problem's subject→teacher map.
pub fn audit(timetable: &Timetable, problem: &ProblemModel) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_consistency(timetable, problem, &mut violations);
    check_load(timetable, problem, &mut violations);
    check_mutual_exclusion(timetable, &mut violations);
    check_lab_capacity(timetable, &mut violations);
    check_teachers(timetable, &mut violations);
    check_batches(timetable, &mut violations);
    violations
}

fn check_consistency(timetable: &Timetable, problem: &ProblemModel, out: &mut Vec<Violation>) {
    for (day, slot, division, activity) in timetable.iter() {
        let cell = cell_label(day, slot, division);
        let Some(subject_id) = problem.find_subject(&activity.subject) else {
            out.push(Violation::inconsistent(
                &activity.subject,
                format!("{cell}: unknown subject {}", activity.subject),
            ));
            continue;
        };
        let expected = problem
            .teacher_of(subject_id)
            .and_then(|t| problem.teacher(t))
            .map(|t| t.id.as_str());
        if expected != Some(activity.teacher_id.as_str()) {
            out.push(Violation::inconsistent(
                &activity.teacher_id,
                format!(
                    "{cell}: {} is taught by {:?}, not {}",
                    activity.subject, expected, activity.teacher_id
                ),
            ));
        }
        if activity.is_practical() {
            let preferred: HashSet<&str> = problem
                .preferred_labs(subject_id)
                .iter()
                .filter_map(|&l| problem.lab(l))
                .map(|l| l.name.as_str())
                .collect();
            for placement in &activity.batches {
                if !preferred.contains(placement.lab.as_str()) {
                    out.push(Violation::inconsistent(
                        &placement.lab,
                        format!(
                            "{cell}: batch {} of {} in non-preferred lab {}",
                            placement.batch, activity.subject, placement.lab
                        ),
                    ));
                }
            }
        }
    }
}

fn check_load(timetable: &Timetable, problem: &ProblemModel, out: &mut Vec<Violation>) {
    let mut counts: HashMap<(Division, &str, SessionType), u32> = HashMap::new();
    for (_, _, division, activity) in timetable.iter() {
        *counts
            .entry((division, activity.subject.as_str(), activity.session_type))
            .or_insert(0) += 1;
    }

    for subject in problem.subjects() {
        for division in Division::ALL {
            for (kind, required) in [
                (SessionType::Theory, subject.theory_per_week),
                (SessionType::Practical, subject.practical_per_week),
            ] {
                let got = counts
                    .get(&(division, subject.name.as_str(), kind))
                    .copied()
                    .unwrap_or(0);
                if got < required {
                    out.push(Violation::load_shortfall(
                        &subject.name,
                        format!(
                            "{} has {} {} slot(s) of {} but needs {}",
                            division, got, kind, subject.name, required
                        ),
                    ));
                }
            }
        }
    }
}

fn check_mutual_exclusion(timetable: &Timetable, out: &mut Vec<Violation>) {
    for day in Day::ALL {
        for slot in Slot::all() {
            for division in Division::ALL {
                let practical = timetable
                    .get(day, slot, division)
                    .is_some_and(|a| a.is_practical());
                if !practical {
                    continue;
                }
                let partner_in_theory = timetable
                    .get(day, slot, division.other())
                    .is_some_and(|a| a.session_type == SessionType::Theory);
                if !partner_in_theory {
                    out.push(Violation::mutual_exclusion(
                        cell_label(day, slot, division),
                        format!(
                            "{}: practical while {} is not in theory",
                            cell_label(day, slot, division),
                            division.other()
                        ),
                    ));
                }
            }
        }
    }
}

fn check_lab_capacity(timetable: &Timetable, out: &mut Vec<Violation>) {
    for day in Day::ALL {
        for slot in Slot::all() {
            let mut occupancy: HashMap<&str, usize> = HashMap::new();
            for division in Division::ALL {
                if let Some(activity) = timetable.get(day, slot, division) {
                    for placement in &activity.batches {
                        *occupancy.entry(placement.lab.as_str()).or_insert(0) += 1;
                    }
                }
            }
            let mut labs: Vec<_> = occupancy.into_iter().filter(|(_, n)| *n > 1).collect();
            labs.sort();
            for (lab, n) in labs {
                out.push(Violation::lab_capacity(
                    lab,
                    format!("{} {}: lab {} hosts {} batches", day, slot, lab, n),
                ));
            }
        }
    }
}

fn check_teachers(timetable: &Timetable, out: &mut Vec<Violation>) {
    // (teacher, day) -> busy slots
    let mut busy: HashMap<(&str, Day), HashSet<Slot>> = HashMap::new();

    for day in Day::ALL {
        for slot in Slot::all() {
            let a = timetable.get(day, slot, Division::A);
            let b = timetable.get(day, slot, Division::B);
            if let (Some(a), Some(b)) = (a, b) {
                if a.teacher_id == b.teacher_id {
                    out.push(Violation::teacher_conflict(
                        &a.teacher_id,
                        format!(
                            "{} {}: {} teaches both divisions",
                            day,
                            slot,
                            a.teacher_display()
                        ),
                    ));
                }
            }
            for activity in [a, b].into_iter().flatten() {
                busy.entry((activity.teacher_id.as_str(), day))
                    .or_default()
                    .insert(slot);
            }
        }
    }

    let pairs = rest_pairs();
    let mut keys: Vec<_> = busy.keys().copied().collect();
    keys.sort();
    for key in keys {
        let slots = &busy[&key];
        for (x, y) in &pairs {
            if slots.contains(x) && slots.contains(y) {
                out.push(Violation::teacher_rest(
                    key.0,
                    format!("{} {}: busy at {} and {}", key.0, key.1, x, y),
                ));
            }
        }
    }
}

fn check_batches(timetable: &Timetable, out: &mut Vec<Violation>) {
    for (day, slot, division, activity) in timetable.iter() {
        if !activity.is_practical() {
            continue;
        }
        let placed: Vec<Batch> = activity.batches.iter().map(|b| b.batch).collect();
        let complete = placed.len() == Batch::ALL.len()
            && Batch::ALL.iter().all(|b| placed.contains(b));
        if !complete {
            let labels: Vec<&str> = placed.iter().map(|b| b.label()).collect();
            out.push(Violation::batch_atomicity(
                cell_label(day, slot, division),
                format!(
                    "{}: practical {} places batches [{}]",
                    cell_label(day, slot, division),
                    activity.subject,
                    labels.join(", ")
                ),
            ));
        }
    }
}
