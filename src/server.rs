use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::pages::home::home_props;
use crate::pages::post::post_props;
use crate::pages::preview::{clear_preview_cookie, preview as resolve_preview, preview_cookie, redirect_page, PreviewResponse};
use crate::prismic::{find_cookie, DocumentSource, PrismicSources, SourceFactory, PREVIEW_COOKIE};
use crate::query_string::QueryString;
use crate::view::comments::comments_script;
use crate::view::home_renderer::HomeRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::templates::Templates;

pub struct AppState {
    config: Config,
    sources: Box<dyn SourceFactory>,
    templates: Templates,
    comments: String,
}

impl AppState {
    pub fn new(config: Config, sources: Box<dyn SourceFactory>) -> io::Result<AppState> {
        let templates = Templates::load(config.paths.template_dir.as_deref())?;
        let comments = config.comments.as_ref().map(comments_script).unwrap_or_default();
        Ok(AppState {
            config,
            sources,
            templates,
            comments,
        })
    }
}

fn query_string(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or_default())
}

/// Source reading through the visitor's preview ref, if any.
fn source_for(req: &HttpRequest, state: &AppState) -> Result<Box<dyn DocumentSource>, web::HttpResponse> {
    let cookie = req.headers().get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| find_cookie(header, PREVIEW_COOKIE));

    state.sources.source(cookie).map_err(|e| {
        error!("Error creating Prismic client: {}", e);
        web::HttpResponse::InternalServerError()
            .body(format!("Error creating Prismic client: {}", e))
    })
}

fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

#[web::get("/")]
async fn home(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let config = &state.config;
    let source = match source_for(&req, &state) {
        Ok(source) => source,
        Err(response) => return response,
    };

    let page = query_string(&req).get_page();
    let props = match home_props(source.as_ref(), config.defaults.page_size, page, &config.defaults.timezone).await {
        Ok(props) => props,
        Err(e) => {
            error!("Error listing posts: {}", e);
            return web::HttpResponse::InternalServerError()
                .body(format!("Error listing posts: {}", e));
        }
    };

    match HomeRenderer::new(&state.templates.home) {
        Ok(renderer) => html(renderer.render(&config.defaults.site_name, &props)),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering home: {}", e)),
    }
}

#[web::get("/post/{slug}")]
async fn post(req: HttpRequest, slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let config = &state.config;
    let slug = slug.into_inner();
    let source = match source_for(&req, &state) {
        Ok(source) => source,
        Err(response) => return response,
    };

    let post_view = match post_props(source.as_ref(), &slug, &config.defaults.timezone).await {
        Ok(post_view) => post_view,
        Err(e) => {
            error!("Error loading post {}: {}", slug, e);
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading post {}: {}", slug, e));
        }
    };

    let renderer = match PostRenderer::new(&state.templates.post) {
        Ok(renderer) => renderer,
        Err(e) => return web::HttpResponse::InternalServerError()
            .body(format!("Error rendering post {}: {}", slug, e)),
    };

    let is_preview = source.is_preview();
    let rendered = renderer.render(&config.defaults.site_name, post_view.as_ref(), &state.comments, is_preview);
    if post_view.is_none() {
        info!("Post {} not found", slug);
        return web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(rendered);
    }

    html(rendered)
}

#[web::get("/api/preview")]
async fn preview(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let source = match state.sources.source(None) {
        Ok(source) => source,
        Err(e) => return web::HttpResponse::InternalServerError()
            .body(format!("Error creating Prismic client: {}", e)),
    };

    let qs = query_string(&req);
    match resolve_preview(source.as_ref(), qs.get("token"), qs.get("documentId")).await {
        PreviewResponse::Unauthorized(body) => {
            let body = serde_json::to_string(&body).unwrap_or_default();
            web::HttpResponse::Unauthorized()
                .content_type("application/json")
                .body(body)
        }
        PreviewResponse::Redirect { location, token } => {
            info!("Preview session started, redirecting to {}", location);
            web::HttpResponse::Ok()
                .header("Set-Cookie", preview_cookie(&token))
                .content_type("text/html; charset=utf-8")
                .body(redirect_page(&location))
        }
    }
}

#[web::get("/api/exit-preview")]
async fn exit_preview() -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Set-Cookie", clear_preview_cookie())
        .header("Location", "/")
        .finish()
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let sources = Box::new(PrismicSources::new(config.clone()));
    let app_state = Arc::new(AppState::new(config, sources)?);

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(home)
            .service(post)
            .service(preview)
            .service(exit_preview)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
