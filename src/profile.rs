use crate::data::{format_price, Catalog, CompanionRecord};
use crate::explore::render_presence_badges;
use crate::routes::Route;
use crate::Directory;
use log::{debug, error};
use yew::prelude::*;
use yew_router::prelude::*;

/// First record whose id equals `id`.
pub fn find_by_id<'a>(records: &'a [CompanionRecord], id: &str) -> Option<&'a CompanionRecord> {
    records.iter().find(|record| record.id == id)
}

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub id: String,
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let directory = use_context::<Directory>();
    let Some(directory) = directory else {
        error!("Profile page rendered without a loaded directory");
        return html! {};
    };
    let dataset = &directory.dataset;

    let Some(companion) = find_by_id(&dataset.companions, &props.id) else {
        debug!("No companion with id '{}'", props.id);
        return render_not_found();
    };

    let currency = directory.config.currency_symbol.as_str();
    let price_rows = companion.price_range.offered().map(|(kind, price)| {
        html! {
            <div class={classes!("price-row", format!("tier-{}", kind.as_str()))}>
                <span class="tier-name">
                    <span class="service-icon">{ kind.icon() }</span>
                    { kind.tier_label() }
                </span>
                <span class="tier-price">{ format_price(currency, price) }</span>
            </div>
        }
    });

    html! {
        <div class="profile-page">
            <Link<Route> to={Route::Explore} classes={classes!("back-link")}>{ "← Voltar" }</Link<Route>>

            <div class="profile-grid">
                <aside class="profile-card">
                    <div class="profile-avatar">
                        <img src={companion.avatar.clone()} alt={companion.name.clone()} />
                        { render_presence_badges(companion, "Online agora") }
                    </div>
                    <div class="profile-info">
                        <div class="profile-heading">
                            <h1>{ &companion.name }</h1>
                            <button class="favorite" title="Favoritar">{ "♡" }</button>
                        </div>
                        <div class="profile-stats">
                            <span class="rating">{ format!("★ {:.1}", companion.rating) }</span>
                            <span class="sessions">
                                { format!("{} sessões realizadas", companion.total_sessions) }
                            </span>
                        </div>
                        <div class="price-list">
                            { for price_rows }
                        </div>
                        <button class="primary-action">{ "Agendar Sessão" }</button>
                        <button class="secondary-action">{ "Enviar Mensagem" }</button>
                    </div>
                </aside>

                <div class="profile-details">
                    <section class="profile-section">
                        <h2>{ "Sobre" }</h2>
                        <p>{ &companion.bio }</p>
                    </section>
                    { render_catalog_section("Personalidade", "personality", &dataset.personalities, &companion.personalities) }
                    { render_catalog_section("Gêneros Favoritos", "genre", &dataset.genres, &companion.genres) }
                    { render_catalog_section("Plataformas de Streaming", "platform", &dataset.platforms, &companion.platforms) }
                    { render_availability(companion) }
                    <section class="profile-section safety">
                        <h3>{ "Ambiente Seguro" }</h3>
                        <p>
                            { "Todas as sessões são monitoradas. Comportamentos inadequados resultam em banimento imediato. " }
                            { "Mantenha o respeito e aproveite a experiência!" }
                        </p>
                    </section>
                </div>
            </div>
        </div>
    }
}

fn render_catalog_section(title: &str, kind: &'static str, catalog: &Catalog, ids: &[String]) -> Html {
    html! {
        <section class="profile-section">
            <h2>{ title }</h2>
            <div class="chip-row">
                { for ids.iter().map(|id| html! {
                    <span key={id.clone()} class={classes!("chip", kind)}>{ catalog.label(id) }</span>
                }) }
            </div>
        </section>
    }
}

fn render_availability(companion: &CompanionRecord) -> Html {
    html! {
        <section class="profile-section">
            <h2>{ "📅 Disponibilidade" }</h2>
            <div class="availability">
                { for companion.availability.iter().map(|entry| html! {
                    <div class="availability-day">
                        <div class="day-label">{ &entry.day }</div>
                        <div class="slot-row">
                            { for entry.slots.iter().map(|slot| html! { <span class="slot">{ slot }</span> }) }
                        </div>
                    </div>
                }) }
            </div>
        </section>
    }
}

fn render_not_found() -> Html {
    html! {
        <div class="profile-page not-found">
            <div class="empty-icon">{ "😢" }</div>
            <h1>{ "Acompanhante não encontrado" }</h1>
            <Link<Route> to={Route::Explore}>{ "← Voltar para explorar" }</Link<Route>>
        </div>
    }
}
