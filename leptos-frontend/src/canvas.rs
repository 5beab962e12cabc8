use plan_evaluator::GraphView;
use std::collections::HashMap;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const PADDING: f64 = 60.0;
const MIN_NODE_RADIUS: f64 = 8.0;
const MAX_NODE_RADIUS: f64 = 40.0;

/// Render a room graph with nodes on a circle, sized by room area
pub fn render_graph(canvas: &HtmlCanvasElement, view: &GraphView) {
    let Some(context) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Clear canvas
    context.clear_rect(0.0, 0.0, width, height);
    context.set_fill_style(&"white".into());
    context.fill_rect(0.0, 0.0, width, height);

    if view.nodes.is_empty() {
        context.set_fill_style(&"#999".into());
        context.set_font("16px sans-serif");
        let _ = context.fill_text("Evaluate a plan to see its graph", 20.0, height / 2.0);
        return;
    }

    let positions = circle_layout(view.nodes.len(), width, height, PADDING);
    let by_id: HashMap<&str, (f64, f64)> = view
        .nodes
        .iter()
        .zip(positions.iter().copied())
        .map(|(node, pos)| (node.id.as_str(), pos))
        .collect();

    // Edges first so circles sit on top
    context.set_stroke_style(&"#888".into());
    context.set_line_width(2.0);
    for edge in &view.edges {
        if let (Some(&(x1, y1)), Some(&(x2, y2))) =
            (by_id.get(edge.from.as_str()), by_id.get(edge.to.as_str()))
        {
            context.begin_path();
            context.move_to(x1, y1);
            context.line_to(x2, y2);
            context.stroke();
        }
    }

    let max_value = view.max_value();
    context.set_font("13px sans-serif");
    for (index, (node, (x, y))) in view.nodes.iter().zip(positions).enumerate() {
        let radius = node_radius(node.value, max_value);

        context.set_fill_style(&room_color(index).into());
        context.begin_path();
        let _ = context.arc(x, y, radius, 0.0, 2.0 * PI);
        context.fill();

        context.set_fill_style(&"#000".into());
        let label = format!("{} ({} m²)", node.label, node.value);
        let _ = context.fill_text(&label, x - radius, y - radius - 4.0);
    }
}

/// Evenly spaced points on a circle centred in the canvas
fn circle_layout(count: usize, width: f64, height: f64, padding: f64) -> Vec<(f64, f64)> {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = ((width.min(height) / 2.0) - padding).max(0.0);

    (0..count)
        .map(|i| {
            // Start at the top and go clockwise
            let angle = 2.0 * PI * i as f64 / count as f64 - PI / 2.0;
            (center_x + radius * angle.cos(), center_y + radius * angle.sin())
        })
        .collect()
}

/// Radius grows with the square root of area so circle area tracks room area
fn node_radius(value: f64, max_value: f64) -> f64 {
    if max_value <= 0.0 || value <= 0.0 {
        return MIN_NODE_RADIUS;
    }
    (MAX_NODE_RADIUS * (value / max_value).sqrt()).max(MIN_NODE_RADIUS)
}

/// Generate a color for a room based on its position
fn room_color(index: usize) -> String {
    let colors = [
        "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E2",
        "#F8B88B", "#ABEBC6",
    ];

    colors[index % colors.len()].to_string()
}
