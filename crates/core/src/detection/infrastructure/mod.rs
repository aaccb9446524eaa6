pub mod onnx_blazeface_detector;
pub mod onnx_face_mesh_provider;
pub mod onnx_session;
