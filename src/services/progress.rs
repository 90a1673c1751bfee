// src/services/progress.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    dashboard::{MemberProgress, OrderAggregate, Progress},
    target::Target,
};

// O que foi realizado no período
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Achievement {
    pub revenue: Decimal,
    pub orders: u64,
}

impl From<&OrderAggregate> for Achievement {
    fn from(aggregate: &OrderAggregate) -> Self {
        Self { revenue: aggregate.total_price, orders: aggregate.total_count }
    }
}

// Metas efetivas. Meta ausente vale zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Goals {
    pub revenue: Decimal,
    pub orders: i64,
}

impl From<&Target> for Goals {
    fn from(target: &Target) -> Self {
        Self {
            revenue: target.revenue_target.unwrap_or(Decimal::ZERO),
            orders: target.order_target.map(i64::from).unwrap_or(0),
        }
    }
}

/// `achieved / target` limitado a [0, 1]. Meta zero ou negativa dá 0.
fn ratio(achieved: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // Overflow só acontece com realizado muito acima da meta
    achieved
        .checked_div(target)
        .unwrap_or(Decimal::ONE)
        .clamp(Decimal::ZERO, Decimal::ONE)
}

pub fn compute_progress(target: Option<&Target>, achievement: Achievement) -> Progress {
    let goals = target.map(Goals::from).unwrap_or_default();
    progress_against(goals, achievement)
}

pub fn progress_against(goals: Goals, achievement: Achievement) -> Progress {
    let revenue_progress = ratio(achievement.revenue, goals.revenue);
    let order_progress = ratio(Decimal::from(achievement.orders), Decimal::from(goals.orders));
    let overall_progress = (revenue_progress + order_progress) / Decimal::TWO;

    Progress {
        achieved_revenue: achievement.revenue,
        achieved_orders: achievement.orders,
        revenue_target: goals.revenue,
        order_target: goals.orders,
        revenue_progress,
        order_progress,
        overall_progress,
        overall_percent: (overall_progress * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    }
}

/// Ordena do maior para o menor progresso geral. Empates mantêm a ordem de entrada.
pub fn rank_by_progress(members: &mut [MemberProgress]) {
    members.sort_by(|a, b| b.progress.overall_progress.cmp(&a.progress.overall_progress));
}
