#![allow(dead_code)]

//! Display-ready figures derived from an analytics snapshot.
//!
//! Derivation only formats what the backend sent: ranks follow list position,
//! gap and surplus numbers are passed through untouched.

use std::fmt;

use crate::models::analytics::{
    AnalyticsSnapshot, JobStats, LabelCount, SkillShortage, SkillSurplus, SkillsGapAnalysis,
};

/// `count` as a whole percentage of `total`, rounded half up. Zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let (count, total) = (u128::from(count), u128::from(total));
    let rounded = (200 * count + total) / (2 * total);
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageShare {
    pub stage: String,
    pub count: u64,
    pub percentage: u64,
}

/// One entry of a backend-ordered list. `rank` is 1-based list position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDemand {
    pub total_jobs: u64,
    pub skills_in_demand: Vec<RankedEntry>,
    pub location_demand: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortageView {
    NoneDetected,
    Skills(Vec<SkillShortage>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapView {
    /// The snapshot carried no gap analysis at all.
    Unavailable,
    Available {
        shortage: ShortageView,
        surplus: Vec<SkillSurplus>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub total_candidates: u64,
    pub stages: Vec<StageShare>,
    pub top_skills: Vec<RankedEntry>,
    pub job_demand: Option<JobDemand>,
    pub skills_gap: GapView,
}

fn ranked(pairs: &[LabelCount]) -> Vec<RankedEntry> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, LabelCount(label, count))| RankedEntry {
            rank: i + 1,
            label: label.clone(),
            count: *count,
        })
        .collect()
}

impl From<&JobStats> for JobDemand {
    fn from(stats: &JobStats) -> Self {
        Self {
            total_jobs: stats.total_jobs,
            skills_in_demand: ranked(&stats.skills_in_demand),
            location_demand: ranked(&stats.location_demand),
        }
    }
}

impl From<Option<&SkillsGapAnalysis>> for GapView {
    fn from(gap: Option<&SkillsGapAnalysis>) -> Self {
        let Some(gap) = gap else {
            return GapView::Unavailable;
        };
        let shortage = match &gap.skills_shortage {
            Some(skills) if !skills.is_empty() => ShortageView::Skills(skills.clone()),
            _ => ShortageView::NoneDetected,
        };
        GapView::Available {
            shortage,
            surplus: gap.surplus_skills.clone().unwrap_or_default(),
        }
    }
}

impl AnalyticsReport {
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> Self {
        let total_candidates: u64 = snapshot.count_by_stage.iter().map(|s| s.count).sum();
        let stages = snapshot
            .count_by_stage
            .iter()
            .map(|s| StageShare {
                stage: s.stage.clone(),
                count: s.count,
                percentage: percentage(s.count, total_candidates),
            })
            .collect();

        Self {
            total_candidates,
            stages,
            top_skills: ranked(&snapshot.top_skills),
            job_demand: snapshot.job_stats.as_ref().map(JobDemand::from),
            skills_gap: GapView::from(snapshot.skills_gap_analysis.as_ref()),
        }
    }

    /// True when no candidate is in any stage.
    pub fn is_empty(&self) -> bool {
        self.total_candidates == 0
    }

    pub fn percentage(&self, stage: &str) -> Option<u64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.percentage)
    }
}

fn write_ranked(f: &mut fmt::Formatter<'_>, title: &str, entries: &[RankedEntry]) -> fmt::Result {
    writeln!(f, "{title}")?;
    if entries.is_empty() {
        return writeln!(f, "  (none)");
    }
    for entry in entries {
        writeln!(f, "  #{:<3} {:<24} {}", entry.rank, entry.label, entry.count)?;
    }
    Ok(())
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total candidates: {}", self.total_candidates)?;
        writeln!(f, "Pipeline stages:  {}", self.stages.len())?;
        if let Some(demand) = &self.job_demand {
            writeln!(f, "Open jobs:        {}", demand.total_jobs)?;
        }
        writeln!(f)?;

        writeln!(f, "Candidates by stage")?;
        if self.is_empty() {
            writeln!(f, "  No pipeline data yet")?;
        } else {
            for share in &self.stages {
                writeln!(
                    f,
                    "  {:<20} {:>5}  {:>3}%",
                    share.stage, share.count, share.percentage
                )?;
            }
        }
        writeln!(f)?;

        write_ranked(f, "Top skills", &self.top_skills)?;

        if let Some(demand) = &self.job_demand {
            writeln!(f)?;
            write_ranked(f, "Skills in demand", &demand.skills_in_demand)?;
            writeln!(f)?;
            write_ranked(f, "Openings by location", &demand.location_demand)?;
        }
        writeln!(f)?;

        writeln!(f, "Skills gap")?;
        match &self.skills_gap {
            GapView::Unavailable => writeln!(f, "  Skills gap analysis not available")?,
            GapView::Available { shortage, surplus } => {
                match shortage {
                    ShortageView::NoneDetected => writeln!(f, "  No skill shortage detected")?,
                    ShortageView::Skills(skills) => {
                        writeln!(f, "  Shortage:")?;
                        for s in skills {
                            writeln!(
                                f,
                                "    {:<20} demand {:>3}  supply {:>3}  gap {:>3}",
                                s.skill, s.demand_count, s.supply_count, s.gap
                            )?;
                        }
                    }
                }
                if !surplus.is_empty() {
                    writeln!(f, "  Surplus:")?;
                    for s in surplus {
                        writeln!(
                            f,
                            "    {:<20} demand {:>3}  supply {:>3}  surplus {:>3}",
                            s.skill, s.demand_count, s.supply_count, s.surplus
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
