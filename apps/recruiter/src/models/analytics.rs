use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Candidate count for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCount {
    pub stage: String,
    pub count: u64,
}

/// A `[label, count]` pair as the backend encodes ranked lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelCount(pub String, pub u64);

/// Raw analytics payload.
///
/// `count_by_stage` keeps the document order of the backend's map. Ranked
/// lists keep the backend's order as well; nothing here re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    #[serde(default, deserialize_with = "deserialize_stage_counts")]
    pub count_by_stage: Vec<StageCount>,
    #[serde(default)]
    pub top_skills: Vec<LabelCount>,
    #[serde(default)]
    pub job_stats: Option<JobStats>,
    #[serde(default)]
    pub skills_gap_analysis: Option<SkillsGapAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub skills_in_demand: Vec<LabelCount>,
    #[serde(default)]
    pub location_demand: Vec<LabelCount>,
}

/// Backend partition of skills into shortage and surplus. Either list may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsGapAnalysis {
    #[serde(default)]
    pub skills_shortage: Option<Vec<SkillShortage>>,
    #[serde(default)]
    pub surplus_skills: Option<Vec<SkillSurplus>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillShortage {
    pub skill: String,
    #[serde(default)]
    pub demand_count: u64,
    #[serde(default)]
    pub supply_count: u64,
    /// demand - supply, as computed by the backend.
    #[serde(default)]
    pub gap: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSurplus {
    pub skill: String,
    #[serde(default)]
    pub demand_count: u64,
    #[serde(default)]
    pub supply_count: u64,
    /// supply - demand, as computed by the backend.
    #[serde(default)]
    pub surplus: i64,
}

fn deserialize_stage_counts<'de, D>(deserializer: D) -> Result<Vec<StageCount>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StageCountsVisitor;

    impl<'de> Visitor<'de> for StageCountsVisitor {
        type Value = Vec<StageCount>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of pipeline stage to candidate count")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut stages = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((stage, count)) = map.next_entry::<String, u64>()? {
                stages.push(StageCount { stage, count });
            }
            Ok(stages)
        }
    }

    deserializer.deserialize_map(StageCountsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_counts_keep_document_order() {
        let snapshot: AnalyticsSnapshot = serde_json::from_str(
            r#"{"countByStage": {"Sourced": 5, "Applied": 3, "Interview": 1}}"#,
        )
        .unwrap();
        let stages: Vec<&str> = snapshot
            .count_by_stage
            .iter()
            .map(|s| s.stage.as_str())
            .collect();
        assert_eq!(stages, vec!["Sourced", "Applied", "Interview"]);
    }

    #[test]
    fn test_missing_sections_are_explicitly_absent() {
        let snapshot: AnalyticsSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.count_by_stage.is_empty());
        assert!(snapshot.top_skills.is_empty());
        assert!(snapshot.job_stats.is_none());
        assert!(snapshot.skills_gap_analysis.is_none());
    }

    #[test]
    fn test_ranked_pairs_and_gap_lists_parse() {
        let snapshot: AnalyticsSnapshot = serde_json::from_str(
            r#"{
                "topSkills": [["React", 12], ["Python", 9]],
                "jobStats": {"totalJobs": 4, "skillsInDemand": [["Go", 2]], "locationDemand": [["Rabat", 3]]},
                "skillsGapAnalysis": {
                    "skillsShortage": [],
                    "surplusSkills": [{"skill": "Go", "demandCount": 2, "supplyCount": 5, "surplus": 3}]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.top_skills[0], LabelCount("React".to_string(), 12));
        assert_eq!(snapshot.job_stats.unwrap().total_jobs, 4);
        let gap = snapshot.skills_gap_analysis.unwrap();
        assert_eq!(gap.skills_shortage, Some(vec![]));
        assert_eq!(gap.surplus_skills.unwrap()[0].surplus, 3);
    }
}
