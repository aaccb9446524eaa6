pub mod capture {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure {
        pub mod nokhwa_frame_source;
    }
}

pub mod control {
    pub mod domain {
        pub mod action_sink;
        pub mod screenshot_naming;
    }
    pub mod infrastructure {
        pub mod enigo_action_sink;
        pub mod xcap_screen_capturer;
    }
}

pub mod detection {
    pub mod domain {
        pub mod face_landmarks;
        pub mod landmark_provider;
    }
    pub mod infrastructure;
}

pub mod display {
    pub mod domain {
        pub mod frame_display;
        pub mod overlay_renderer;
    }
    pub mod infrastructure {
        pub mod bitmap_text_renderer;
        pub mod minifb_display;
    }
}

pub mod gesture {
    pub mod domain {
        pub mod blink_classifier;
        pub mod click_dispatcher;
        pub mod clock;
        pub mod cursor_mapper;
        pub mod eye_distance;
        pub mod gesture_config;
        pub mod gesture_intent;
        pub mod gesture_interpreter;
        pub mod interpreter_state;
        pub mod screenshot_trigger;
        pub mod zoom_detector;
    }
    pub mod infrastructure {
        pub mod monotonic_clock;
    }
}

pub mod pipeline {
    pub mod eye_control_use_case;
    pub mod frame_sampler;
    pub mod pipeline_logger;
    pub mod infrastructure {
        pub mod threaded_loop_runner;
    }
}

pub mod shared {
    pub mod constants;
    pub mod face_box;
    pub mod frame;
    pub mod model_resolver;
}
