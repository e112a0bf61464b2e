use super::types::{StudentRecord, StudentStats};
use std::collections::BTreeMap;

impl StudentStats {
    pub fn summarize(records: &[StudentRecord]) -> Self {
        let total_students = records.len();
        let active_students = records.iter().filter(|record| record.active).count();

        let average_age = if total_students == 0 {
            0.0
        } else {
            let age_sum: u64 = records.iter().map(|record| u64::from(record.age)).sum();
            age_sum as f64 / total_students as f64
        };

        let mut courses = BTreeMap::new();
        for record in records {
            *courses.entry(record.course.clone()).or_insert(0) += 1;
        }

        Self {
            total_students,
            active_students,
            inactive_students: total_students - active_students,
            average_age,
            courses,
        }
    }
}
