// Writes sample /evaluate requests and their expected scores
use plan_evaluator::{
    build_graph_with_mode, evaluate, ParseMode, ReferenceCatalog, DEFAULT_ADJACENCY_TEXT,
    IDEAL_EDGES,
};
use std::collections::HashMap;
use std::fs;

struct PlanCase {
    name: &'static str,
    sizes: HashMap<String, f64>,
    adjacency: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏠 Room Plan Evaluator Fixtures");
    println!("================================\n");

    let catalog = ReferenceCatalog::standard();
    fs::create_dir_all("data")?;

    for case in plan_cases(&catalog) {
        println!("📋 {}", case.name);
        save_case(&catalog, &case)?;
        println!();
    }

    println!("✅ All fixtures generated!");
    println!("\n🚀 To test:");
    println!("   1. Start server: cargo run --release --bin axum-backend");
    println!("   2. Post a fixture:");
    println!("      curl -X POST http://localhost:3000/evaluate \\");
    println!("           -H 'Content-Type: application/json' \\");
    println!("           -d @data/ideal_plan_request.json | jq");

    Ok(())
}

fn plan_cases(catalog: &ReferenceCatalog<'_>) -> Vec<PlanCase> {
    let ideal_sizes = catalog.default_candidate_sizes();
    let ideal_adjacency = IDEAL_EDGES
        .iter()
        .map(|(a, b)| format!("{}, {}", a, b))
        .collect::<Vec<_>>()
        .join("\n");

    // Cramped bedrooms and an oversized living room
    let mut skewed_sizes = ideal_sizes.clone();
    skewed_sizes.insert("Living".to_string(), 30.0);
    skewed_sizes.insert("Bedroom2".to_string(), 7.5);
    skewed_sizes.insert("Bedroom3".to_string(), 7.0);

    vec![
        PlanCase {
            name: "ideal_plan",
            sizes: ideal_sizes.clone(),
            adjacency: ideal_adjacency.clone(),
        },
        PlanCase {
            name: "default_form",
            sizes: ideal_sizes.clone(),
            adjacency: DEFAULT_ADJACENCY_TEXT.to_string(),
        },
        PlanCase {
            name: "skewed_sizes",
            sizes: skewed_sizes,
            adjacency: ideal_adjacency,
        },
        PlanCase {
            name: "noisy_adjacency",
            sizes: ideal_sizes,
            adjacency: "Living, Dining\nLiving Dining Kitchen\n\nKitchen, Store, Toilet1\nBedroom1,Bath1"
                .to_string(),
        },
    ]
}

fn save_case(
    catalog: &ReferenceCatalog<'_>,
    case: &PlanCase,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = serde_json::json!({
        "sizes": case.sizes,
        "adjacency": case.adjacency,
    });

    let filename = format!("data/{}_request.json", case.name);
    fs::write(&filename, serde_json::to_string_pretty(&request)?)?;

    let report = evaluate(catalog, &case.sizes, &case.adjacency)?.report;
    let skipped = match build_graph_with_mode(catalog.room_names(), &case.adjacency, ParseMode::Strict) {
        Ok(_) => "none".to_string(),
        Err(e) => e.to_string(),
    };

    println!("   ✅ Saved: {}", filename);
    println!("   📊 Expected final score: {:.2}", report.final_score);
    println!("   📐 Size {:.2}, adjacency {:.2}", report.size_score, report.adjacency_score);
    println!("   🔧 Suggestions: {}", report.suggestions.len());
    println!("   ⚠️  First malformed line: {}", skipped);

    Ok(())
}
