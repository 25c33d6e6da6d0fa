use shared::analytics::{derive_metrics, DerivedMetrics};
use yew::prelude::*;

use crate::components::utils;
use crate::{Model, Msg};

pub fn render_dashboard(model: &Model, ctx: &Context<Model>) -> Html {
    // Derived from the current snapshot on every render; nothing cached.
    let metrics = derive_metrics(&model.records);

    html! {
        <div class="container">
            <h1 class="dashboard-title">{"Smart Waste Dashboard"}</h1>

            { utils::render_error(model.fetch_error.as_deref()) }
            { render_stat_cards(&metrics) }
            { render_distribution(&metrics) }
            { render_records_table(model) }

            <button
                class="analyze-btn"
                onclick={ctx.link().callback(|_| Msg::RefreshRecords)}
            >
                <i class="fa-solid fa-rotate"></i>{" Refresh"}
            </button>
        </div>
    }
}

fn render_stat_cards(metrics: &DerivedMetrics) -> Html {
    let cards = [
        ("Total Scans", metrics.total_scans.to_string()),
        ("Recyclable %", format!("{}%", metrics.recyclable_percent)),
        ("Avg Carbon Score", metrics.average_carbon_score.to_string()),
        ("Most Common Waste", metrics.most_common_waste_type.clone()),
    ];

    html! {
        <div class="stats-container">
            { for cards.iter().map(|(title, value)| html! {
                <div class="stat-card">
                    <h3>{ *title }</h3>
                    <p>{ value.clone() }</p>
                </div>
            })}
        </div>
    }
}

fn render_distribution(metrics: &DerivedMetrics) -> Html {
    if metrics.waste_type_distribution.is_empty() {
        return html! {};
    }

    let total = metrics.total_scans;
    html! {
        <div class="chart-container">
            <h2 class="section-title">{"Waste Type Distribution"}</h2>
            <div class="result-bars">
                { for metrics.waste_type_distribution.iter().map(|(waste_type, count)| {
                    let percentage = (*count as f64) * 100.0 / (total as f64);
                    html! {
                        <div class="result-item">
                            <div class="result-label">{ waste_type.clone() }</div>
                            <div class="result-bar-container">
                                <div class="result-bar" style={format!("width: {percentage}%")}></div>
                            </div>
                            <div class="result-value">{ count.to_string() }</div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

fn render_records_table(model: &Model) -> Html {
    html! {
        <div class="table-container">
            <h2 class="section-title">{"Recent Classifications"}</h2>
            <table>
                <thead>
                    <tr>
                        <th>{"Waste"}</th>
                        <th>{"Calorific"}</th>
                        <th>{"Carbon"}</th>
                        <th>{"Route"}</th>
                        <th>{"Timestamp"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for model.records.iter().map(|record| html! {
                        <tr key={record.id.clone()}>
                            <td>{ record.waste_type.clone() }</td>
                            <td>{ record.calorific_value }</td>
                            <td>{ record.carbon_impact.clone() }</td>
                            <td>{ record.route.clone() }</td>
                            <td>{ record.timestamp.clone() }</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}
