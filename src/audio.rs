use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use crate::core::loudness_from_bytes;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub fn find_audio(document: &web::Document, id: &str) -> Option<web::HtmlAudioElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
}

/// Ask the element to start playing. Resolves to an error when the platform
/// refuses (autoplay policy) or the source is missing.
pub async fn try_play(el: &web::HtmlAudioElement) -> anyhow::Result<()> {
    el.set_loop(true);
    let promise = el.play().map_err(|e| anyhow!("play(): {:?}", e))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| anyhow!("playback refused: {:?}", e))
}

/// Wait for a pending `resume()` and report whether the context runs.
pub async fn ensure_running(ctx: &web::AudioContext) -> bool {
    if ctx.state() == web::AudioContextState::Running {
        return true;
    }
    if let Ok(p) = ctx.resume() {
        if let Err(e) = JsFuture::from(p).await {
            log::warn!("[audio] resume refused: {:?}", e);
        }
    }
    ctx.state() == web::AudioContextState::Running
}

/// Frequency tap on the playing element.
pub struct Analysis {
    analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
    buf: Vec<u8>,
}

impl Analysis {
    /// Route the element through an analyser. The context must already be
    /// running; an element can be captured by one context only.
    pub fn attach(ctx: &web::AudioContext, el: &web::HtmlAudioElement) -> anyhow::Result<Self> {
        if ctx.state() != web::AudioContextState::Running {
            return Err(anyhow!("context is {:?}", ctx.state()));
        }
        let source = ctx
            .create_media_element_source(el)
            .map_err(|e| anyhow!("MediaElementSource: {:?}", e))?;
        let analyser = web::AnalyserNode::new(ctx).map_err(|e| anyhow!("AnalyserNode: {:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| anyhow!("connect source: {:?}", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow!("connect destination: {:?}", e))?;
        let bins = analyser.frequency_bin_count() as usize;
        Ok(Self {
            analyser,
            _source: source,
            buf: vec![0; bins],
        })
    }

    /// Mean frequency magnitude in 0..1.
    pub fn sample(&mut self) -> f32 {
        let bins = self.analyser.frequency_bin_count() as usize;
        if self.buf.len() != bins {
            self.buf.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(&mut self.buf);
        loudness_from_bytes(&self.buf)
    }
}

/// The page's music element plus its optional analysis graph. The
/// AudioContext is created and resumed from inside the input handler that
/// asked for playback.
pub struct Player {
    pub element: Option<web::HtmlAudioElement>,
    ctx: Option<web::AudioContext>,
    analysis: Option<Analysis>,
    reactive: bool,
}

impl Player {
    pub fn new(element: Option<web::HtmlAudioElement>, reactive: bool) -> Self {
        Self {
            element,
            ctx: None,
            analysis: None,
            reactive,
        }
    }

    /// Synchronous part of a playback attempt: make sure the context exists
    /// and ask it to resume while the user activation is still current.
    pub fn prime(&mut self) {
        if !self.reactive || self.analysis.is_some() {
            return;
        }
        if self.ctx.is_none() {
            match web::AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    log::warn!("[audio] AudioContext unavailable: {:?}", e);
                    return;
                }
            }
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() != web::AudioContextState::Running {
                _ = ctx.resume();
            }
        }
    }

    /// Context to wait on before attaching, if analysis is still missing.
    pub fn pending_context(&self) -> Option<web::AudioContext> {
        if self.analysis.is_some() {
            return None;
        }
        self.ctx.clone()
    }

    /// Called once playback runs and the context reported running. Failure
    /// leaves the visuals idle.
    pub fn attach_analysis(&mut self) {
        if self.analysis.is_some() {
            return;
        }
        let (Some(ctx), Some(el)) = (&self.ctx, &self.element) else {
            return;
        };
        match Analysis::attach(ctx, el) {
            Ok(a) => {
                log::info!("[audio] analyser attached ({} bins)", a.buf.len());
                self.analysis = Some(a);
            }
            Err(e) => log::warn!("[audio] no analysis, visuals stay idle: {:?}", e),
        }
    }

    /// Loudness for this frame; silence until the analyser exists.
    pub fn loudness(&mut self) -> f32 {
        self.analysis.as_mut().map_or(0.0, Analysis::sample)
    }

    pub fn shutdown(&mut self) {
        if let Some(el) = &self.element {
            _ = el.pause();
        }
        if let Some(a) = self.analysis.take() {
            _ = a.analyser.disconnect();
        }
        if let Some(ctx) = self.ctx.take() {
            if let Ok(p) = ctx.close() {
                wasm_bindgen_futures::spawn_local(async move {
                    _ = JsFuture::from(p).await;
                    log::info!("[audio] analysis context closed");
                });
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}
