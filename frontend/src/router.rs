use crate::dashboard::api::{fetch_analysis, fetch_defaults};
use crate::dashboard::components::{ParameterSummary, ResultsTable, Sidebar};
use crate::dashboard::player::VideoPlayer;
use crate::dashboard::state::Parameters;
use crate::env_variable_utils::get_app_name;
use crate::models::{AnalysisResponse, DashboardDefaults};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <DashboardApp /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-700">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Go back to the dashboard"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

#[function_component(DashboardApp)]
pub fn dashboard_app() -> Html {
    let defaults = use_state(DashboardDefaults::default);
    let parameters = use_state(|| None::<Parameters>);
    let response = use_state(|| None::<AnalysisResponse>);
    let loading = use_state(|| false);
    let error_message = use_state(Option::<String>::default);
    let selected_video = use_state(String::new);
    let latest_revision = use_mut_ref(|| 0u64);

    // Load the widget defaults once
    {
        let defaults = defaults.clone();
        let parameters = parameters.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let loaded = match fetch_defaults().await {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        log::warn!("Using built-in defaults: {e}");
                        DashboardDefaults::default()
                    }
                };
                parameters.set(Some(Parameters::new(
                    loaded.default_query.clone(),
                    loaded.default_threshold,
                )));
                defaults.set(loaded);
            });
            || ()
        });
    }

    // Every parameter change is a fresh, independent analysis. Only the
    // newest request may touch the table.
    {
        let response = response.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let latest_revision = latest_revision.clone();
        use_effect_with((*parameters).clone(), move |parameters| {
            if let Some(request) = parameters.clone() {
                *latest_revision.borrow_mut() = request.revision;
                loading.set(true);
                error_message.set(None);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = fetch_analysis(&request.query, request.threshold).await;
                    if !request.is_latest(*latest_revision.borrow()) {
                        log::debug!("Dropping stale analysis for \"{}\"", request.query);
                        return;
                    }
                    match result {
                        Ok(result) => response.set(Some(result)),
                        Err(e) => {
                            response.set(None);
                            error_message.set(Some(e));
                        }
                    }
                    loading.set(false);
                });
            }
            || ()
        });
    }

    let current = (*parameters).clone().unwrap_or_else(|| {
        Parameters::new(defaults.default_query.clone(), defaults.default_threshold)
    });

    let on_query = {
        let parameters = parameters.clone();
        let current = current.clone();
        Callback::from(move |query: String| {
            parameters.set(Some(current.with_query(query)));
        })
    };

    let on_threshold = {
        let parameters = parameters.clone();
        let current = current.clone();
        Callback::from(move |threshold: u64| {
            parameters.set(Some(current.with_threshold(threshold)));
        })
    };

    let on_select = {
        let selected_video = selected_video.clone();
        Callback::from(move |video_id: String| selected_video.set(video_id))
    };

    html! {
        <div class="min-h-screen flex flex-col md:flex-row bg-gray-100">
            <Sidebar
                query={current.query.clone()}
                threshold={current.threshold}
                defaults={(*defaults).clone()}
                loading={*loading}
                on_query={on_query}
                on_threshold={on_threshold}
            />
            <main class="flex-1 p-8">
                <div class="bg-white rounded-lg shadow-lg p-8 max-w-6xl mx-auto">
                    <h1 class="text-3xl font-bold text-gray-800 mb-6">{get_app_name()}</h1>
                    <ParameterSummary query={current.query.clone()} threshold={current.threshold} />
                    <ResultsTable
                        response={(*response).clone()}
                        loading={*loading}
                        error={(*error_message).clone()}
                        on_select={on_select}
                    />
                    <VideoPlayer selected={(*selected_video).clone()} />
                </div>
            </main>
        </div>
    }
}
