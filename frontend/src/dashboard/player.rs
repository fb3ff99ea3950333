use crate::dashboard::api::fetch_embed;
use crate::models::EmbedResponse;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub const EMBED_ERROR_MESSAGE: &str = "Oops! Something seems to have gone wrong. :(";

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    /// Video id picked from the results table.
    pub selected: String,
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let video_id = use_state(|| props.selected.clone());
    let embed = use_state(|| None::<EmbedResponse>);
    let error_message = use_state(|| None::<String>);

    {
        let video_id = video_id.clone();
        use_effect_with(props.selected.clone(), move |selected| {
            if !selected.is_empty() {
                video_id.set(selected.clone());
            }
            || ()
        });
    }

    let on_input = {
        let video_id = video_id.clone();
        Callback::from(move |e: InputEvent| {
            video_id.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_show = {
        let video_id = video_id.clone();
        let embed = embed.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            let id = (*video_id).trim().to_string();
            if id.is_empty() {
                return;
            }
            let embed = embed.clone();
            let error_message = error_message.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_embed(&id).await {
                    Ok(response) => {
                        error_message.set(None);
                        embed.set(Some(response));
                    }
                    Err(e) => {
                        log::warn!("Embedding {id} failed: {e}");
                        embed.set(None);
                        error_message.set(Some(EMBED_ERROR_MESSAGE.to_string()));
                    }
                }
            });
        })
    };

    html! {
        <section>
            <h3 class="text-lg font-semibold text-gray-800 mb-2">{"Video player"}</h3>
            <div class="flex mb-4">
                <input
                    type="text"
                    class="flex-grow p-2 border border-gray-300 rounded-l focus:outline-none focus:ring-2 focus:ring-blue-500"
                    placeholder="Enter a video ID"
                    value={(*video_id).clone()}
                    oninput={on_input}
                />
                <button
                    class="bg-blue-600 text-white px-4 rounded-r hover:bg-blue-700"
                    onclick={on_show}
                >
                    {"Show video"}
                </button>
            </div>
            {
                if let Some(msg) = &*error_message {
                    html! {
                        <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4">
                            <strong>{ msg }</strong>
                        </div>
                    }
                } else if let Some(embed) = &*embed {
                    html! {
                        <div>
                            <iframe
                                class="w-full aspect-video rounded"
                                src={embed.embed_url.clone()}
                                title={embed.video_id.clone()}
                                allow="accelerometer; autoplay; encrypted-media; picture-in-picture"
                                allowfullscreen={true}
                            />
                            <a href={embed.watch_url.clone()} target="_blank" class="text-sm text-blue-600 hover:underline">
                                {&embed.watch_url}
                            </a>
                        </div>
                    }
                } else {
                    html! { <p class="text-gray-500">{"The video will be shown here."}</p> }
                }
            }
        </section>
    }
}
