use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use plan_evaluator::{GraphView, DEFAULT_ADJACENCY_TEXT, IDEAL_ROOMS, MIN_ROOM_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

mod canvas;
use canvas::*;

/// Backend base URL, fixed at build time
const API_URL: &str = match option_env!("PLAN_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

#[derive(Debug, Serialize)]
struct EvaluateRequest {
    sizes: HashMap<String, f64>,
    adjacency: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ScoreSummary {
    final_score: String,
    size_score: String,
    adjacency_score: String,
}

#[derive(Debug, Clone, Deserialize)]
struct EvaluateResponse {
    summary: ScoreSummary,
    suggestions: Vec<String>,
    matches_ideal: bool,
    ideal_graph: GraphView,
    candidate_graph: GraphView,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Size typed into a room field, clamped to the minimum area; unparsable
/// text falls back to `fallback`
fn parse_room_size(text: &str, fallback: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.max(MIN_ROOM_SIZE),
        _ => fallback,
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/leptos-frontend.css"/>
        <Title text="Room Plan Evaluator"/>
        <PlanEvaluator/>
    }
}

#[component]
fn PlanEvaluator() -> impl IntoView {
    // One input per reference room, seeded with the ideal size. The signal
    // holds the raw field text so typing is never rewritten mid-edit.
    let size_inputs: Vec<(&'static str, f64, RwSignal<String>)> = IDEAL_ROOMS
        .iter()
        .map(|room| (room.name, room.size, RwSignal::new(room.size.to_string())))
        .collect();
    let adjacency = RwSignal::new(DEFAULT_ADJACENCY_TEXT.to_string());
    let result = RwSignal::new(Option::<EvaluateResponse>::None);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let ideal_canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let candidate_canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let submit_inputs = size_inputs.clone();
    let on_evaluate = move |_| {
        let request = EvaluateRequest {
            sizes: submit_inputs
                .iter()
                .map(|(name, ideal, text)| {
                    (name.to_string(), parse_room_size(&text.get_untracked(), *ideal))
                })
                .collect(),
            adjacency: adjacency.get_untracked(),
        };

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match evaluate_plan(request).await {
                Ok(response) => {
                    result.set(Some(response));
                }
                Err(e) => {
                    error.set(Some(format!("Evaluation failed: {}", e)));
                }
            }
            loading.set(false);
        });
    };

    // Redraw both graphs whenever a new result arrives
    Effect::new(move |_| {
        let Some(response) = result.get() else {
            return;
        };
        if let Some(canvas) = ideal_canvas_ref.get_untracked() {
            render_graph(&canvas, &response.ideal_graph);
        }
        if let Some(canvas) = candidate_canvas_ref.get_untracked() {
            render_graph(&canvas, &response.candidate_graph);
        }
    });

    let size_fields = size_inputs
        .into_iter()
        .map(|(name, ideal, text)| {
            let id = format!("size-{}", name);
            view! {
                <div class="size-control">
                    <label for=id.clone()>{format!("{} size (m²)", name)}</label>
                    <input
                        type="number"
                        id=id
                        min=MIN_ROOM_SIZE.to_string()
                        step="0.5"
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                        on:change=move |ev| {
                            let size = parse_room_size(&event_target_value(&ev), ideal);
                            text.set(size.to_string());
                        }
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="container">
            <header>
                <h1>"Room Plan Evaluator"</h1>
                <p>"Compare a floor plan against the ideal layout"</p>
            </header>

            <section class="controls">
                <h2>"Step 1: Enter Room Sizes"</h2>
                <div class="size-grid">{size_fields}</div>

                <h2>"Step 2: Define Room Adjacencies"</h2>
                <p>"Enter one pair per line, format: " <code>"RoomA, RoomB"</code></p>
                <textarea
                    id="adjacency"
                    rows="8"
                    cols="40"
                    prop:value=move || adjacency.get()
                    on:input=move |ev| adjacency.set(event_target_value(&ev))
                />

                <button
                    class="evaluate-button"
                    on:click=on_evaluate
                    disabled=move || loading.get()
                >
                    {move || if loading.get() { "Evaluating..." } else { "Evaluate Plan" }}
                </button>
            </section>

            {move || error.get().map(|err| view! {
                <div class="error">
                    {err}
                </div>
            })}

            {move || result.get().map(|response| view! {
                <div class="scores">
                    <p class="final-score">"Final Plan Score: " {response.summary.final_score.clone()}</p>
                    <ul>
                        <li>"Size Match Score: " {response.summary.size_score.clone()}</li>
                        <li>"Adjacency Match Score: " {response.summary.adjacency_score.clone()}</li>
                    </ul>
                    {if response.matches_ideal {
                        view! { <p class="success">"Your plan closely matches the ideal!"</p> }.into_any()
                    } else {
                        view! {
                            <div class="suggestions">
                                <h3>"Suggestions to Improve Plan:"</h3>
                                <ul>
                                    {response.suggestions.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}
                                </ul>
                            </div>
                        }.into_any()
                    }}
                </div>
            })}

            <div class="graphs">
                <div class="canvas-container">
                    <h3>"Ideal Plan Graph"</h3>
                    <canvas
                        node_ref=ideal_canvas_ref
                        width="500"
                        height="500"
                        style="border: 1px solid #ccc;"
                    />
                </div>
                <div class="canvas-container">
                    <h3>"Candidate Plan Graph"</h3>
                    <canvas
                        node_ref=candidate_canvas_ref
                        width="500"
                        height="500"
                        style="border: 1px solid #ccc;"
                    />
                </div>
            </div>
        </div>
    }
}

async fn evaluate_plan(request: EvaluateRequest) -> Result<EvaluateResponse, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/evaluate", API_URL))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&error_text)
            .map(|body| body.message)
            .unwrap_or(error_text);
        return Err(format!("Server error ({}): {}", status, message));
    }

    response
        .json::<EvaluateResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_size_keeps_typed_value() {
        assert_eq!(parse_room_size("14.5", 22.0), 14.5);
        assert_eq!(parse_room_size(" 3 ", 22.0), 3.0);
    }

    #[test]
    fn test_room_size_clamped_to_minimum() {
        assert_eq!(parse_room_size("0", 22.0), MIN_ROOM_SIZE);
        assert_eq!(parse_room_size("-4", 22.0), MIN_ROOM_SIZE);
        assert_eq!(parse_room_size("0.", 22.0), MIN_ROOM_SIZE);
    }

    #[test]
    fn test_unparsable_size_falls_back() {
        assert_eq!(parse_room_size("", 22.0), 22.0);
        assert_eq!(parse_room_size("abc", 22.0), 22.0);
        assert_eq!(parse_room_size("NaN", 22.0), 22.0);
    }
}
