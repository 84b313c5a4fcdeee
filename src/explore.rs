use crate::config::AppConfig;
use crate::data::{format_price, Catalog, CompanionRecord, Dataset, ServiceKind};
use crate::filter::{filter_companions, toggle, FilterCriteria};
use crate::routes::Route;
use crate::Directory;
use log::{debug, error};
use std::collections::BTreeSet;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExploreState {
    pub criteria: FilterCriteria,
    pub filters_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExploreAction {
    SetSearchText(String),
    ToggleGenre(String),
    TogglePlatform(String),
    TogglePersonality(String),
    ToggleService(ServiceKind),
    SetOnlineOnly(bool),
    ToggleFiltersPanel,
    ClearAll,
}

impl Reducible for ExploreState {
    type Action = ExploreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let criteria = &mut next.criteria;
        match action {
            ExploreAction::SetSearchText(text) => criteria.search_text = text,
            ExploreAction::ToggleGenre(id) => criteria.genres = toggle(&criteria.genres, id),
            ExploreAction::TogglePlatform(id) => {
                criteria.platforms = toggle(&criteria.platforms, id)
            }
            ExploreAction::TogglePersonality(id) => {
                criteria.personalities = toggle(&criteria.personalities, id)
            }
            ExploreAction::ToggleService(kind) => {
                criteria.services = toggle(&criteria.services, kind)
            }
            ExploreAction::SetOnlineOnly(online_only) => criteria.online_only = online_only,
            ExploreAction::ToggleFiltersPanel => next.filters_open = !next.filters_open,
            ExploreAction::ClearAll => return Rc::new(Self::default()),
        }
        Rc::new(next)
    }
}

pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 acompanhante encontrado".to_string()
    } else {
        format!("{} acompanhantes encontrados", count)
    }
}

#[function_component(ExplorePage)]
pub fn explore_page() -> Html {
    let state = use_reducer(ExploreState::default);
    let directory = use_context::<Directory>();
    let Some(directory) = directory else {
        error!("Explore page rendered without a loaded directory");
        return html! {};
    };
    let dataset = &directory.dataset;
    let config = &directory.config;

    let visible = filter_companions(&dataset.companions, &state.criteria);

    let on_search = {
        let state = state.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            state.dispatch(ExploreAction::SetSearchText(input.value()));
        })
    };

    let on_online_change = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            state.dispatch(ExploreAction::SetOnlineOnly(input.checked()));
        })
    };

    let toggle_panel = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(ExploreAction::ToggleFiltersPanel))
    };

    let clear_all = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            debug!("Clearing explore filters");
            state.dispatch(ExploreAction::ClearAll);
        })
    };

    let dispatcher = |make: fn(String) -> ExploreAction| {
        let state = state.clone();
        Callback::from(move |id: String| state.dispatch(make(id)))
    };

    let selection_count = state.criteria.active_selection_count();

    let filters_panel = if state.filters_open {
        html! {
            <div class="filters-panel">
                { render_chip_group("Gêneros de Anime", "genre", &dataset.genres, &state.criteria.genres, dispatcher(ExploreAction::ToggleGenre)) }
                { render_chip_group("Plataformas", "platform", &dataset.platforms, &state.criteria.platforms, dispatcher(ExploreAction::TogglePlatform)) }
                { render_chip_group("Personalidade", "personality", &dataset.personalities, &state.criteria.personalities, dispatcher(ExploreAction::TogglePersonality)) }
                { render_service_group(&state.criteria.services, &state) }
            </div>
        }
    } else {
        html! {}
    };

    let results = if visible.is_empty() {
        html! {
            <div class="empty-state">
                <div class="empty-icon">{ "😢" }</div>
                <h3>{ "Nenhum acompanhante encontrado" }</h3>
                <p>{ "Tente ajustar seus filtros ou busca" }</p>
                <button class="clear-filters" onclick={clear_all}>{ "Limpar filtros" }</button>
            </div>
        }
    } else {
        html! {
            <div class="companion-grid">
                { for visible.iter().map(|companion| render_card(companion, dataset, config)) }
            </div>
        }
    };

    html! {
        <div class="explore-page">
            <header class="page-header">
                <h1>{ "Explorar Acompanhantes" }</h1>
                <p>{ "Encontre o acompanhante perfeito para assistir anime juntos" }</p>
            </header>

            <div class="search-controls">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Buscar por nome ou descrição..."
                    value={state.criteria.search_text.clone()}
                    oninput={on_search}
                />
                <div class="filter-bar">
                    <button class={classes!("filters-toggle", state.filters_open.then_some("open"))}
                        onclick={toggle_panel}>
                        <span>{ "Filtros" }</span>
                        {
                            if selection_count > 0 {
                                html! { <span class="filter-badge">{ selection_count }</span> }
                            } else {
                                html! {}
                            }
                        }
                    </button>
                    <label class="online-only">
                        <input type="checkbox" checked={state.criteria.online_only} onchange={on_online_change} />
                        <span>{ "Apenas online" }</span>
                    </label>
                </div>
                { filters_panel }
            </div>

            <p class="results-count">{ results_label(visible.len()) }</p>
            { results }
        </div>
    }
}

fn render_chip_group(
    title: &str,
    kind: &'static str,
    catalog: &Catalog,
    selected: &BTreeSet<String>,
    on_toggle: Callback<String>,
) -> Html {
    html! {
        <div class="filter-group">
            <h3>{ title }</h3>
            <div class="chip-row">
                { for catalog.entries().iter().map(|entry| {
                    let id = entry.id.clone();
                    let on_toggle = on_toggle.clone();
                    let onclick = Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()));
                    let class = classes!(
                        "chip",
                        kind,
                        selected.contains(&entry.id).then_some("active")
                    );
                    html! {
                        <button key={entry.id.clone()} class={class} onclick={onclick}>
                            { format!("{} {}", entry.icon, entry.name) }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

fn render_service_group(
    selected: &BTreeSet<ServiceKind>,
    state: &UseReducerHandle<ExploreState>,
) -> Html {
    html! {
        <div class="filter-group">
            <h3>{ "Tipo de Atendimento" }</h3>
            <div class="chip-row">
                { for ServiceKind::ALL.into_iter().map(|kind| {
                    let state = state.clone();
                    let onclick =
                        Callback::from(move |_: MouseEvent| state.dispatch(ExploreAction::ToggleService(kind)));
                    let class = classes!(
                        "chip",
                        "service",
                        selected.contains(&kind).then_some("active")
                    );
                    html! {
                        <button key={kind.as_str()} class={class} onclick={onclick}>
                            <span class="service-icon">{ kind.icon() }</span>
                            <span>{ kind.label() }</span>
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

fn render_card(companion: &CompanionRecord, dataset: &Dataset, config: &AppConfig) -> Html {
    let genre_icons = companion
        .genres
        .iter()
        .take(config.card_genre_limit)
        .map(|genre| dataset.genres.icon(genre).to_string());
    let price = companion
        .price_range
        .starting_price()
        .map(|value| format!("{}+", format_price(&config.currency_symbol, value)))
        .unwrap_or_default();

    html! {
        <Link<Route> to={Route::Companion { id: companion.id.clone() }} classes={classes!("companion-card")}>
            <div class="card-avatar">
                <img src={companion.avatar.clone()} alt={companion.name.clone()} />
                { render_presence_badges(companion, "Online") }
            </div>
            <div class="card-body">
                <div class="card-heading">
                    <h3>{ &companion.name }</h3>
                    <span class="rating">{ format!("★ {:.1}", companion.rating) }</span>
                </div>
                <p class="card-bio">{ &companion.bio }</p>
                <div class="card-tags">
                    { for genre_icons.map(|icon| html! { <span class="tag">{ icon }</span> }) }
                </div>
                <div class="card-footer">
                    <span class="sessions">{ format!("{} sessões", companion.total_sessions) }</span>
                    <span class="price">{ price }</span>
                </div>
            </div>
        </Link<Route>>
    }
}

/// Online and verified badges laid over an avatar.
pub(crate) fn render_presence_badges(companion: &CompanionRecord, online_text: &str) -> Html {
    html! {
        <>
            if companion.is_online {
                <div class="badge online">
                    <span class="pulse"></span>
                    <span>{ online_text }</span>
                </div>
            }
            if companion.is_verified {
                <div class="badge verified">{ "✓ Verificada" }</div>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{full_criteria, full_match, yui_and_rin};

    fn reduce_all(actions: Vec<ExploreAction>) -> Rc<ExploreState> {
        actions
            .into_iter()
            .fold(Rc::new(ExploreState::default()), |state, action| state.reduce(action))
    }

    #[test]
    fn toggles_build_criteria() {
        let state = reduce_all(vec![
            ExploreAction::SetSearchText("yu".to_string()),
            ExploreAction::ToggleGenre("shonen".to_string()),
            ExploreAction::ToggleGenre("romance".to_string()),
            ExploreAction::ToggleGenre("shonen".to_string()),
            ExploreAction::TogglePlatform("netflix".to_string()),
            ExploreAction::TogglePersonality("calma".to_string()),
            ExploreAction::ToggleService(ServiceKind::Voice),
            ExploreAction::SetOnlineOnly(true),
        ]);
        let criteria = &state.criteria;
        assert_eq!(criteria.search_text, "yu");
        assert_eq!(criteria.genres.iter().collect::<Vec<_>>(), vec!["romance"]);
        assert!(criteria.platforms.contains("netflix"));
        assert!(criteria.personalities.contains("calma"));
        assert!(criteria.services.contains(&ServiceKind::Voice));
        assert!(criteria.online_only);
        assert_eq!(criteria.active_selection_count(), 4);
    }

    #[test]
    fn reductions_do_not_mutate_previous_state() {
        let before = Rc::new(ExploreState::default());
        let after = before
            .clone()
            .reduce(ExploreAction::ToggleGenre("shonen".to_string()));
        assert!(before.criteria.genres.is_empty());
        assert!(after.criteria.genres.contains("shonen"));
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn filters_panel_toggles() {
        let open = reduce_all(vec![ExploreAction::ToggleFiltersPanel]);
        assert!(open.filters_open);
        let closed = open.reduce(ExploreAction::ToggleFiltersPanel);
        assert!(!closed.filters_open);
    }

    #[test]
    fn clear_all_resets_every_field() {
        let criteria = full_criteria();
        let mut actions = vec![
            ExploreAction::ToggleFiltersPanel,
            ExploreAction::SetSearchText(criteria.search_text.clone()),
            ExploreAction::SetOnlineOnly(true),
            ExploreAction::ToggleService(ServiceKind::Video),
        ];
        actions.extend(criteria.genres.iter().cloned().map(ExploreAction::ToggleGenre));
        actions.push(ExploreAction::ClearAll);

        let state = reduce_all(actions);
        assert_eq!(*state, ExploreState::default());
        assert!(state.criteria.is_empty());
    }

    #[test]
    fn clear_all_then_filter_matches_default_filter() {
        let mut records = yui_and_rin();
        records.push(full_match());
        let state = reduce_all(vec![
            ExploreAction::SetOnlineOnly(true),
            ExploreAction::ToggleGenre("romance".to_string()),
            ExploreAction::ClearAll,
        ]);
        assert_eq!(
            filter_companions(&records, &state.criteria),
            filter_companions(&records, &FilterCriteria::default())
        );
        assert_eq!(filter_companions(&records, &state.criteria).len(), 3);
    }

    #[test]
    fn results_label_pluralizes() {
        assert_eq!(results_label(0), "0 acompanhantes encontrados");
        assert_eq!(results_label(1), "1 acompanhante encontrado");
        assert_eq!(results_label(7), "7 acompanhantes encontrados");
    }
}
