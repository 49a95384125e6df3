use crate::{
    client::{
        api::helper::{parse_response, post, send_request, serialize_json},
        model::error::ApiError,
    },
    model::server::{CreateServerDto, CreateServerResponseDto},
};

pub async fn create_server(
    payload: &CreateServerDto,
) -> Result<CreateServerResponseDto, ApiError> {
    let body = serialize_json(payload)?;
    let request = post("/api/create-server").body(body);
    let response = send_request(request).await?;
    parse_response(response).await
}
