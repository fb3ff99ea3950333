use crate::models::{AnalysisResponse, DashboardDefaults, ResultRow};
use crate::utils::{channel_link, format_number, format_optional_number, video_link};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub query: String,
    pub threshold: u64,
    pub defaults: DashboardDefaults,
    pub loading: bool,
    pub on_query: Callback<String>,
    pub on_threshold: Callback<u64>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <aside class="w-full md:w-72 bg-gray-800 text-white p-6 space-y-6">
            <h2 class="text-xl font-bold">{"Query and threshold"}</h2>
            <div>
                <h3 class="text-sm font-semibold uppercase tracking-wider text-gray-300 mb-2">{"Search query"}</h3>
                <QueryInput
                    query={props.query.clone()}
                    loading={props.loading}
                    on_search={props.on_query.clone()}
                />
            </div>
            <div>
                <h3 class="text-sm font-semibold uppercase tracking-wider text-gray-300 mb-2">{"Subscriber threshold"}</h3>
                <ThresholdSlider
                    value={props.threshold}
                    min={props.defaults.threshold_min}
                    max={props.defaults.threshold_max}
                    step={props.defaults.threshold_step}
                    on_change={props.on_threshold.clone()}
                />
            </div>
        </aside>
    }
}

#[derive(Properties, PartialEq)]
pub struct QueryInputProps {
    pub query: String,
    pub loading: bool,
    pub on_search: Callback<String>,
}

#[function_component(QueryInput)]
pub fn query_input(props: &QueryInputProps) -> Html {
    let current_input = use_state(|| props.query.clone());

    // Follow the parent when it replaces the query (defaults arriving)
    {
        let current_input = current_input.clone();
        use_effect_with(props.query.clone(), move |query| {
            current_input.set(query.clone());
            || ()
        });
    }

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let on_search = props.on_search.clone();
        let current_input = current_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_search.emit((*current_input).clone());
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex">
            <input
                type="text"
                class="flex-grow p-2 text-gray-900 rounded-l focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder="Enter a search query"
                value={(*current_input).clone()}
                oninput={on_input}
                disabled={props.loading}
            />
            <button
                type="submit"
                class="bg-blue-600 px-3 rounded-r hover:bg-blue-700 disabled:opacity-50"
                disabled={props.loading}
            >
                { if props.loading { "..." } else { "Go" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ThresholdSliderProps {
    pub value: u64,
    pub min: u64,
    pub max: u64,
    pub step: u64,
    pub on_change: Callback<u64>,
}

/// Shows the value while dragging, commits it on release.
#[function_component(ThresholdSlider)]
pub fn threshold_slider(props: &ThresholdSliderProps) -> Html {
    let dragging = use_state(|| props.value);

    {
        let dragging = dragging.clone();
        use_effect_with(props.value, move |value| {
            dragging.set(*value);
            || ()
        });
    }

    let on_input = {
        let dragging = dragging.clone();
        Callback::from(move |e: InputEvent| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            if let Ok(value) = input.value().parse::<u64>() {
                dragging.set(value);
            }
        })
    };

    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input = e.target_unchecked_into::<HtmlInputElement>();
            if let Ok(value) = input.value().parse::<u64>() {
                on_change.emit(value);
            }
        })
    };

    html! {
        <div>
            <input
                type="range"
                class="w-full"
                min={props.min.to_string()}
                max={props.max.to_string()}
                step={props.step.to_string()}
                value={(*dragging).to_string()}
                oninput={on_input}
                onchange={on_change}
            />
            <div class="flex justify-between text-xs text-gray-400">
                <span>{format_number(props.min)}</span>
                <span class="text-white font-semibold">{format_number(*dragging)}</span>
                <span>{format_number(props.max)}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ParameterSummaryProps {
    pub query: String,
    pub threshold: u64,
}

#[function_component(ParameterSummary)]
pub fn parameter_summary(props: &ParameterSummaryProps) -> Html {
    html! {
        <section class="mb-6">
            <h3 class="text-lg font-semibold text-gray-800 mb-2">{"Selected parameters"}</h3>
            <ul class="list-disc list-inside text-gray-700">
                <li>{format!("Search query: {}", props.query)}</li>
                <li>{format!("Subscriber threshold: {}", format_number(props.threshold))}</li>
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultsTableProps {
    pub response: Option<AnalysisResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(ResultsTable)]
pub fn results_table(props: &ResultsTableProps) -> Html {
    let body = if props.loading {
        html! { <p class="text-center text-gray-500 py-6">{"Loading..."}</p> }
    } else if let Some(error) = &props.error {
        html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded">
                { error }
            </div>
        }
    } else if let Some(response) = &props.response {
        html! {
            <>
                {
                    if let Some(warning) = &response.warning {
                        html! {
                            <div class="bg-yellow-100 border border-yellow-400 text-yellow-800 px-4 py-3 rounded mb-4">
                                { warning }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                <div class="overflow-x-auto">
                    <table class="min-w-full bg-white border border-gray-300">
                        <thead class="bg-gray-50">
                            <tr>
                                { for response.columns.iter().map(|column| html! {
                                    <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{column}</th>
                                })}
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200">
                            { for response.rows.iter().map(|row| html! {
                                <ResultRowView row={row.clone()} on_select={props.on_select.clone()} />
                            })}
                        </tbody>
                    </table>
                    {
                        if response.rows.is_empty() {
                            html! { <p class="text-center text-gray-500 py-6">{"No videos matched."}</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </>
        }
    } else {
        html! {}
    };

    html! {
        <section class="mb-8">
            <h3 class="text-lg font-semibold text-gray-800 mb-2">{"Analysis results"}</h3>
            { body }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ResultRowViewProps {
    row: ResultRow,
    on_select: Callback<String>,
}

#[function_component(ResultRowView)]
fn result_row_view(props: &ResultRowViewProps) -> Html {
    let row = &props.row;
    let on_click = {
        let on_select = props.on_select.clone();
        let video_id = row.video_id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(video_id.clone()))
    };

    html! {
        <tr class="hover:bg-gray-50">
            <td class="px-4 py-2 font-mono text-sm">
                <button class="text-blue-600 hover:underline" title="Show in player" onclick={on_click}>
                    {&row.video_id}
                </button>
            </td>
            <td class="px-4 py-2 text-sm">
                <a href={video_link(&row.video_id)} target="_blank" class="hover:underline">
                    {row.title.clone().unwrap_or_else(|| "-".to_string())}
                </a>
            </td>
            <td class="px-4 py-2 text-sm text-right">{format_optional_number(row.view_count)}</td>
            <td class="px-4 py-2 text-sm text-right">{format_number(row.subscriber_count)}</td>
            <td class="px-4 py-2 font-mono text-sm">
                <a href={channel_link(&row.channel_id)} target="_blank" class="text-blue-600 hover:underline">
                    {&row.channel_id}
                </a>
            </td>
        </tr>
    }
}
