//! Plain-text report tables on stdout.

use pointpilot_core::ScoredTransaction;
use pointpilot_rewards::{BestCardRow, CardSummary, CategorySummary, Insight, Overview};

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

pub fn print_overview(o: &Overview) {
    println!("## Points overview\n");
    println!("Transactions:            {}", o.transactions);
    println!("Total spend:             ${:.2}", o.total_spend);
    println!("Points earned:           {:.0}", o.points_earned);
    println!("Optimal points:          {:.0}", o.optimal_points);
    println!("Points missed:           {:.0}", o.missed_points);
    println!("Optimized:               {:.1}%", o.optimization_rate);
    println!("Points per $:            {:.2}", o.points_per_dollar);
    println!("Optimal points per $:    {:.2}", o.optimal_points_per_dollar);
    println!(
        "Used best card:          {}/{}",
        o.used_best_card, o.transactions
    );
    println!();
}

fn scored_line(s: &ScoredTransaction) -> String {
    let t = &s.transaction;
    let flag = if s.used_best_card { "yes" } else { "no" };
    format!(
        "{:<10}  {:<28}  {:>9.2}  {:<13}  {:<24}  {:>8.0}  {:>8.0}  {:>8.0}  {}{}",
        t.date.map(|d| d.to_string()).unwrap_or_default(),
        truncate(&t.merchant, 28),
        t.amount,
        s.category.as_str(),
        truncate(&s.card, 24),
        s.points_earned,
        s.optimal_points,
        s.missed_points,
        flag,
        if s.used_best_card {
            String::new()
        } else {
            format!(" -> {}", s.best_cards_label())
        }
    )
}

pub fn print_scored(rows: &[ScoredTransaction]) {
    println!(
        "{:<10}  {:<28}  {:>9}  {:<13}  {:<24}  {:>8}  {:>8}  {:>8}  best",
        "date", "merchant", "amount", "category", "card", "earned", "optimal", "missed"
    );
    for s in rows {
        println!("{}", scored_line(s));
    }
    println!();
}

fn card_summary_line(r: &CardSummary, point_value: f64) -> String {
    format!(
        "{:<32}  {:>5}  {:>10.2}  {:>9.0}  {:>9.0}  {:>6.1}%  {:>9.2}  {:>9.2}",
        truncate(&r.card, 32),
        r.transactions,
        r.total_spend,
        r.points_earned,
        r.missed_points,
        r.optimization_rate,
        r.earned_value(point_value),
        r.missed_value(point_value)
    )
}

pub fn print_card_summary(rows: &[CardSummary], point_value: f64) {
    println!("## By card\n");
    println!(
        "{:<32}  {:>5}  {:>10}  {:>9}  {:>9}  {:>7}  {:>9}  {:>9}",
        "card", "txns", "spend", "earned", "missed", "optim%", "value", "missed $"
    );
    for r in rows {
        println!("{}", card_summary_line(r, point_value));
    }
    println!();
}

pub fn print_category_summary(title: &str, rows: &[CategorySummary]) {
    println!("## {}\n", title);
    println!(
        "{:<14}  {:>5}  {:>10}  {:>9}  {:>9}  {:>7}",
        "category", "txns", "spend", "earned", "missed", "optim%"
    );
    for r in rows {
        println!(
            "{:<14}  {:>5}  {:>10.2}  {:>9.0}  {:>9.0}  {:>6.1}%",
            r.category.as_str(),
            r.transactions,
            r.total_spend,
            r.points_earned,
            r.missed_points,
            r.optimization_rate
        );
    }
    println!();
}

pub fn print_best_cards(rows: &[BestCardRow]) {
    println!("## Best card by category\n");
    for r in rows {
        let note = if r.conditional { " (select merchants only)" } else { "" };
        println!(
            "{:<14}  {:>4}x  {}{}",
            r.category.as_str(),
            r.rate,
            r.cards.join(" / "),
            note
        );
    }
    println!();
}

pub fn print_insights(insights: &[Insight]) {
    println!("## Insights\n");
    for i in insights {
        println!("- {}", i.message);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    use pointpilot_core::{Category, Transaction};

    fn summary() -> CardSummary {
        CardSummary {
            card: "Chase Freedom Unlimited".to_string(),
            transactions: 2,
            total_spend: 150.0,
            points_earned: 200.0,
            optimal_points: 300.0,
            missed_points: 100.0,
            optimization_rate: 66.67,
        }
    }

    #[test]
    fn test_card_line_values_earned_and_missed() {
        let line = card_summary_line(&summary(), 0.015);
        assert!(line.ends_with("3.00       1.50"), "{line}");
    }

    #[test]
    fn test_scored_line_names_better_card() {
        let s = ScoredTransaction {
            transaction: Transaction::new("Shell", 10.0),
            card: "Plain".to_string(),
            category: Category::Gas,
            used_rate: 1.0,
            best_rate: 2.0,
            best_cards: vec!["Citi".to_string()],
            points_earned: 10.0,
            optimal_points: 20.0,
            missed_points: 10.0,
            used_best_card: false,
            override_applied: false,
            override_reason: None,
        };
        assert!(scored_line(&s).ends_with("no -> Citi"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long merchant name", 8), "a very ~");
        assert_eq!(truncate("café", 4), "café");
    }
}
