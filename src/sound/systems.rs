//! Sound domain: message readers and the playback clock.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::{FrameDelta, SoundRequested, SoundStopped};
use crate::sound::playback::SoundPlayback;

pub(crate) fn stop_sounds(mut stops: MessageReader<SoundStopped>, mut playback: ResMut<SoundPlayback>) {
    for stop in stops.read() {
        let stopped = playback.stop(stop.source);
        if stopped > 0 {
            debug!("Stopped {} sound(s) for {:?}", stopped, stop.source);
        }
    }
}

pub(crate) fn start_sounds(
    mut requests: MessageReader<SoundRequested>,
    mut playback: ResMut<SoundPlayback>,
) {
    for request in requests.read() {
        debug!("{:?} plays {:?}", request.source, request.cue);
        playback.start(request.source, request.cue, request.completion.clone());
    }
}

pub(crate) fn advance_sounds(delta: Res<FrameDelta>, mut playback: ResMut<SoundPlayback>) {
    for sound in playback.advance(delta.ms) {
        debug!("{:?} finished {:?}", sound.source, sound.cue);
    }
}
