use super::policy::ScoringPolicy;
use crate::inspection::{Catalog, InspectionSnapshot, SectionKind};

/// Scan the pre-trip critical registry for unfavourable answers.
///
/// Runs independently of the aggregate percentage. Unanswered critical items
/// inside a recorded section are not failures.
pub fn detect_critical_failures(
    catalog: &Catalog,
    snapshot: &InspectionSnapshot,
    policy: &ScoringPolicy,
) -> Vec<String> {
    let mut failures = Vec::new();

    for kind in SectionKind::pre_trip() {
        let definition = catalog.section(kind);
        if !definition.has_critical_items() {
            continue;
        }

        let Some(answers) = snapshot.section(kind) else {
            if policy.absent_critical_section_fails {
                failures.push(format!(
                    "Critical Section Not Completed: {}",
                    definition.name()
                ));
            }
            continue;
        };

        for item in definition.items.iter().filter(|item| item.critical) {
            if let Some(value) = answers.get(item.id) {
                if !value.satisfies(item.expectation) {
                    failures.push(item.failure_description());
                }
            }
        }
    }

    failures
}
