// Portal services
// Services provide the pieces navigation is built from: proxy codecs, input
// resolution, geo-shard lookup, the frame host seam, frame sync, settings.

pub mod frame_host;
pub mod frame_sync;
pub mod geo_shard;
pub mod input_resolver;
pub mod proxy_codec;
pub mod settings_engine;
